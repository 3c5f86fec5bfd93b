//! Hash-password command implementation
//!
//! Operator utility for seeding accounts directly in the database.

use crate::core::auth::hash_password_async;
use crate::config::secret_string;
use crate::domain::validation::MIN_PASSWORD_LENGTH;
use clap::Args;
use std::io::BufRead;

/// Arguments for the hash-password command
#[derive(Args, Debug)]
pub struct HashPasswordArgs {
    /// Password to hash; read from stdin when omitted
    #[arg(long, env = "SHIFTSYNC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl HashPasswordArgs {
    /// Execute the hash-password command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let password = match &self.password {
            Some(password) => password.clone(),
            None => {
                let mut line = String::new();
                std::io::stdin().lock().read_line(&mut line)?;
                line.trim_end_matches(['\r', '\n']).to_string()
            }
        };

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            eprintln!("❌ Password must be at least {MIN_PASSWORD_LENGTH} characters");
            return Ok(2);
        }

        let hash = hash_password_async(secret_string(password)).await?;
        println!("{hash}");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_short_password_rejected() {
        let args = HashPasswordArgs {
            password: Some("abc".to_string()),
        };
        assert_eq!(args.execute().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_hashes_password() {
        let args = HashPasswordArgs {
            password: Some("hunter22".to_string()),
        };
        assert_eq!(args.execute().await.unwrap(), 0);
    }
}
