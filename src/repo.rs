use crate::{
	db::DbPool,
	models::{Budget, NewBudget, NewUser, Transaction, TransactionFields, User},
	schema::{budgets, transactions, users},
};
use bigdecimal::BigDecimal;
use diesel::{
	prelude::*,
	r2d2::PoolError,
	result::{DatabaseErrorKind, Error as DieselError},
	upsert::excluded,
};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
	/// No row matched the id and owner together.
	#[error("{0} not found")]
	NotFound(&'static str),

	#[error("email already registered")]
	DuplicateEmail,

	#[error("database error: {0}")]
	Database(#[from] DieselError),

	#[error("connection pool error: {0}")]
	Pool(#[from] PoolError),
}

/// Store access for users, transactions and budgets.
///
/// Every transaction and budget operation takes the authenticated caller's id
/// and only ever touches rows owned by that id.
#[cfg_attr(test, mockall::automock)]
pub trait Repository: Send + Sync {
	fn create_user(
		&self,
		email: &str,
		full_name: Option<String>,
		password_hash: &str,
	) -> Result<User, RepoError>;

	fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

	fn list_transactions(
		&self,
		user_id: i32,
		skip: i64,
		limit: i64,
	) -> Result<Vec<Transaction>, RepoError>;

	fn create_transaction(
		&self,
		user_id: i32,
		fields: TransactionFields,
	) -> Result<Transaction, RepoError>;

	/// Replaces every field of the caller's transaction. Fails with
	/// [`RepoError::NotFound`] when the id is unknown or owned by someone else.
	fn update_transaction(
		&self,
		user_id: i32,
		transaction_id: i32,
		fields: TransactionFields,
	) -> Result<Transaction, RepoError>;

	fn delete_transaction(&self, user_id: i32, transaction_id: i32) -> Result<(), RepoError>;

	fn list_budgets(&self, user_id: i32) -> Result<Vec<Budget>, RepoError>;

	/// Sets the caller's budget for `category`, creating it on first use.
	/// There is at most one budget per (user, category).
	fn upsert_budget(
		&self,
		user_id: i32,
		category: &str,
		amount: BigDecimal,
	) -> Result<Budget, RepoError>;
}

pub struct PgRepository {
	pool: DbPool,
}

impl PgRepository {
	pub fn new(pool: DbPool) -> Self {
		Self { pool }
	}
}

impl Repository for PgRepository {
	fn create_user(
		&self,
		email: &str,
		full_name: Option<String>,
		password_hash: &str,
	) -> Result<User, RepoError> {
		let mut conn = self.pool.get()?;
		let new_user = NewUser { email, full_name: full_name.as_deref(), password: password_hash };

		diesel::insert_into(users::table)
			.values(&new_user)
			.returning(User::as_returning())
			.get_result(&mut conn)
			.map_err(|e| match e {
				DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
					RepoError::DuplicateEmail
				},
				e => RepoError::Database(e),
			})
	}

	fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
		let mut conn = self.pool.get()?;
		let user = users::table
			.filter(users::email.eq(email))
			.select(User::as_select())
			.first(&mut conn)
			.optional()?;
		Ok(user)
	}

	fn list_transactions(
		&self,
		user_id: i32,
		skip: i64,
		limit: i64,
	) -> Result<Vec<Transaction>, RepoError> {
		let mut conn = self.pool.get()?;
		let rows = transactions::table
			.filter(transactions::user_id.eq(user_id))
			.order((transactions::date.desc(), transactions::id.desc()))
			.offset(skip)
			.limit(limit)
			.select(Transaction::as_select())
			.load(&mut conn)?;
		Ok(rows)
	}

	fn create_transaction(
		&self,
		user_id: i32,
		fields: TransactionFields,
	) -> Result<Transaction, RepoError> {
		let mut conn = self.pool.get()?;
		let transaction = diesel::insert_into(transactions::table)
			.values(&fields.as_new_transaction(user_id))
			.returning(Transaction::as_returning())
			.get_result(&mut conn)?;
		Ok(transaction)
	}

	fn update_transaction(
		&self,
		user_id: i32,
		transaction_id: i32,
		fields: TransactionFields,
	) -> Result<Transaction, RepoError> {
		let mut conn = self.pool.get()?;
		let owned = transactions::table
			.filter(transactions::id.eq(transaction_id))
			.filter(transactions::user_id.eq(user_id));

		diesel::update(owned)
			.set(&fields.as_changes())
			.returning(Transaction::as_returning())
			.get_result(&mut conn)
			.optional()?
			.ok_or(RepoError::NotFound("Transaction"))
	}

	fn delete_transaction(&self, user_id: i32, transaction_id: i32) -> Result<(), RepoError> {
		let mut conn = self.pool.get()?;
		let deleted = diesel::delete(
			transactions::table
				.filter(transactions::id.eq(transaction_id))
				.filter(transactions::user_id.eq(user_id)),
		)
		.execute(&mut conn)?;

		if deleted == 0 {
			return Err(RepoError::NotFound("Transaction"));
		}
		Ok(())
	}

	fn list_budgets(&self, user_id: i32) -> Result<Vec<Budget>, RepoError> {
		let mut conn = self.pool.get()?;
		let rows = budgets::table
			.filter(budgets::user_id.eq(user_id))
			.order(budgets::id.asc())
			.select(Budget::as_select())
			.load(&mut conn)?;
		Ok(rows)
	}

	fn upsert_budget(
		&self,
		user_id: i32,
		category: &str,
		amount: BigDecimal,
	) -> Result<Budget, RepoError> {
		let mut conn = self.pool.get()?;
		// One statement against UNIQUE (user_id, category), so concurrent
		// requests for the same key cannot both insert.
		let budget = diesel::insert_into(budgets::table)
			.values(&NewBudget { user_id, category, amount: &amount })
			.on_conflict((budgets::user_id, budgets::category))
			.do_update()
			.set(budgets::amount.eq(excluded(budgets::amount)))
			.returning(Budget::as_returning())
			.get_result(&mut conn)?;
		Ok(budget)
	}
}
