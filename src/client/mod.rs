//! Client data and form controllers
//!
//! A typed [`ApiClient`], an explicit [`Session`], and controllers for the login,
//! patient intake and handoff forms.
//!
//! ```rust,no_run
//! use shiftsync::client::forms::{LoginForm, LoginOutcome};
//! use shiftsync::client::{ApiClient, RequestContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::with_base_url("http://localhost:5000")?;
//! let mut form = LoginForm::new();
//! form.email = "nurse@ward.example".to_string();
//! form.password = "hunter22".to_string();
//!
//! let anonymous = RequestContext::anonymous();
//! if let LoginOutcome::SignedIn(session) = form.submit(&api, &anonymous).await? {
//!     let ctx = RequestContext::new(session);
//!     let roster = api.list_patients(&ctx).await?;
//!     println!("{} patients", roster.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod forms;
pub mod session;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use session::{RequestContext, Session};
