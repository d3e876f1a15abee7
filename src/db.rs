use diesel::{
	prelude::*,
	r2d2::{self, ConnectionManager, PoolError},
};

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub fn get_db_pool(database_url: &str) -> Result<DbPool, PoolError> {
	let manager = ConnectionManager::<PgConnection>::new(database_url);
	r2d2::Pool::builder().build(manager)
}

/// Creates the tables when they are missing.
pub fn init(pool: &DbPool) -> anyhow::Result<()> {
	let mut conn = pool.get()?;
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS users (
		id SERIAL PRIMARY KEY,
		email VARCHAR(255) NOT NULL UNIQUE,
		full_name VARCHAR(255),
		password TEXT NOT NULL
	);",
	)
	.execute(&mut conn)?;
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS transactions (
		id SERIAL PRIMARY KEY,
		user_id INTEGER NOT NULL,
		amount NUMERIC NOT NULL,
		description TEXT NOT NULL,
		category VARCHAR(100) NOT NULL DEFAULT 'Uncategorized',
		source_type VARCHAR(10) NOT NULL DEFAULT 'CASH',
		date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
		is_expense BOOLEAN NOT NULL DEFAULT TRUE,
		FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
	);",
	)
	.execute(&mut conn)?;
	diesel::sql_query(
		"CREATE INDEX IF NOT EXISTS transactions_user_id_idx ON transactions (user_id);",
	)
	.execute(&mut conn)?;
	diesel::sql_query(
		"CREATE TABLE IF NOT EXISTS budgets (
		id SERIAL PRIMARY KEY,
		user_id INTEGER NOT NULL,
		category VARCHAR(100) NOT NULL,
		amount NUMERIC NOT NULL,
		UNIQUE (user_id, category),
		FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
	);",
	)
	.execute(&mut conn)?;

	Ok(())
}
