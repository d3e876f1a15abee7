use crate::constants::{
	DEFAULT_CORS_ORIGINS, DEFAULT_PROJECT_NAME, DEFAULT_SOCKET_URL, ONE_WEEK,
};
use anyhow::Context;
use std::{env, str::FromStr};

/// Runtime settings, read from the environment (and `.env`) at startup.
#[derive(Debug, Clone)]
pub struct Settings {
	pub project_name: String,
	pub database_url: String,
	pub jwt_secret: String,
	pub socket_url: String,
	pub cors_origins: Vec<String>,
	pub bcrypt_cost: u32,
	pub token_ttl_secs: usize,
}

impl Settings {
	pub fn from_env() -> anyhow::Result<Self> {
		Ok(Self {
			project_name: var_or("PROJECT_NAME", DEFAULT_PROJECT_NAME.to_string())?,
			database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
			jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
			socket_url: var_or("SOCKET_URL", DEFAULT_SOCKET_URL.to_string())?,
			cors_origins: parse_origins(
				&env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
			),
			bcrypt_cost: var_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
			token_ttl_secs: var_or("TOKEN_TTL_SECS", ONE_WEEK)?,
		})
	}
}

fn var_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	match env::var(key) {
		Ok(raw) => raw.parse::<T>().map_err(|e| anyhow::anyhow!("invalid {}={:?}: {}", key, raw, e)),
		Err(_) => Ok(default),
	}
}

pub fn parse_origins(raw: &str) -> Vec<String> {
	raw.split(',').map(str::trim).filter(|o| !o.is_empty()).map(String::from).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn origins_are_split_and_trimmed() {
		assert_eq!(
			parse_origins(" http://localhost:5173 ,http://localhost:3000,,"),
			vec!["http://localhost:5173".to_string(), "http://localhost:3000".to_string()]
		);
		assert!(parse_origins("").is_empty());
	}

	#[test]
	fn unset_variables_fall_back() {
		let cost: u32 = var_or("FINANCE_FUSION_TEST_UNSET_COST", 9).unwrap();
		assert_eq!(cost, 9);
	}
}
