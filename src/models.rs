use crate::{
	constants::{DEFAULT_CATEGORY, DEFAULT_PAGE_LIMIT},
	schema::*,
};
use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Pg))]
pub struct User {
	pub id: i32,
	pub email: String,
	pub full_name: Option<String>,
	/// bcrypt hash, never serialised
	pub password: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
	pub email: &'a str,
	pub full_name: Option<&'a str>,
	pub password: &'a str,
}

/// Public view of a [`User`].
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
	pub id: i32,
	pub email: String,
	pub full_name: Option<String>,
}

impl From<User> for UserResponse {
	fn from(user: User) -> Self {
		Self { id: user.id, email: user.email, full_name: user.full_name }
	}
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UserCreate {
	#[validate(email)]
	pub email: String,
	#[validate(length(max = 255))]
	pub full_name: Option<String>,
	#[validate(length(min = 8))]
	pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
	pub email: String,
	pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Token {
	pub access_token: String,
	pub token_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceType {
	#[default]
	Cash,
	Upi,
	Card,
}

impl SourceType {
	pub fn as_str(&self) -> &'static str {
		match self {
			SourceType::Cash => "CASH",
			SourceType::Upi => "UPI",
			SourceType::Card => "CARD",
		}
	}
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(Pg))]
pub struct Transaction {
	pub id: i32,
	pub user_id: i32,
	#[serde(with = "bigdecimal::serde::json_num")]
	pub amount: BigDecimal,
	pub description: String,
	pub category: String,
	pub source_type: String,
	pub date: DateTime<Utc>,
	pub is_expense: bool,
}

#[derive(Insertable)]
#[diesel(table_name = transactions)]
pub struct NewTransaction<'a> {
	pub user_id: i32,
	pub amount: &'a BigDecimal,
	pub description: &'a str,
	pub category: &'a str,
	pub source_type: &'a str,
	pub date: DateTime<Utc>,
	pub is_expense: bool,
}

/// Column assignments for a full-replacement update. A `None` date leaves the
/// stored date untouched.
#[derive(AsChangeset)]
#[diesel(table_name = transactions)]
pub struct TransactionChanges<'a> {
	pub amount: &'a BigDecimal,
	pub description: &'a str,
	pub category: &'a str,
	pub source_type: &'a str,
	pub date: Option<DateTime<Utc>>,
	pub is_expense: bool,
}

/// Client payload for creating or replacing a transaction.
///
/// There is no owner field: the owner always comes from the authenticated
/// caller, and a `user_id` sent by the client is dropped during
/// deserialisation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransactionFields {
	#[serde(with = "bigdecimal::serde::json_num")]
	#[validate(custom(function = "validate_positive_amount"))]
	pub amount: BigDecimal,
	#[validate(length(max = 255))]
	pub description: String,
	#[serde(default = "default_category")]
	#[validate(length(min = 1, max = 100))]
	pub category: String,
	#[serde(default)]
	pub source_type: SourceType,
	#[serde(default)]
	pub date: Option<DateTime<Utc>>,
	#[serde(default = "default_is_expense")]
	pub is_expense: bool,
}

impl TransactionFields {
	pub fn as_new_transaction(&self, user_id: i32) -> NewTransaction<'_> {
		NewTransaction {
			user_id,
			amount: &self.amount,
			description: &self.description,
			category: &self.category,
			source_type: self.source_type.as_str(),
			date: self.date.unwrap_or_else(Utc::now),
			is_expense: self.is_expense,
		}
	}

	pub fn as_changes(&self) -> TransactionChanges<'_> {
		TransactionChanges {
			amount: &self.amount,
			description: &self.description,
			category: &self.category,
			source_type: self.source_type.as_str(),
			date: self.date,
			is_expense: self.is_expense,
		}
	}
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = budgets)]
#[diesel(check_for_backend(Pg))]
pub struct Budget {
	pub id: i32,
	pub user_id: i32,
	pub category: String,
	#[serde(with = "bigdecimal::serde::json_num")]
	pub amount: BigDecimal,
}

#[derive(Insertable)]
#[diesel(table_name = budgets)]
pub struct NewBudget<'a> {
	pub user_id: i32,
	pub category: &'a str,
	pub amount: &'a BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BudgetFields {
	#[validate(length(min = 1, max = 100))]
	pub category: String,
	#[serde(with = "bigdecimal::serde::json_num")]
	#[validate(custom(function = "validate_non_negative_amount"))]
	pub amount: BigDecimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct Pagination {
	#[serde(default)]
	#[validate(range(min = 0))]
	pub skip: i64,
	#[serde(default = "default_limit")]
	#[validate(range(min = 0, max = 1000))]
	pub limit: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
	pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub status: u16,
	pub error: String,
}

fn default_category() -> String {
	DEFAULT_CATEGORY.to_string()
}

fn default_is_expense() -> bool {
	true
}

fn default_limit() -> i64 {
	DEFAULT_PAGE_LIMIT
}

fn validate_positive_amount(amount: &BigDecimal) -> Result<(), ValidationError> {
	if *amount <= BigDecimal::zero() {
		return Err(ValidationError::new("amount_not_positive"));
	}
	Ok(())
}

fn validate_non_negative_amount(amount: &BigDecimal) -> Result<(), ValidationError> {
	if *amount < BigDecimal::zero() {
		return Err(ValidationError::new("amount_negative"));
	}
	Ok(())
}
