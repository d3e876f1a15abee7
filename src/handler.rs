use crate::{
	config::Settings,
	constants::{MESSAGE_TRANSACTION_DELETED, TOKEN_TYPE},
	error::ApiError,
	midware::jwt::{CurrentUser, JWT},
	models::{
		BudgetFields, LoginRequest, MessageResponse, Pagination, Token, TransactionFields,
		UserCreate, UserResponse,
	},
	repo::Repository,
};
use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

pub async fn index_handler(settings: web::Data<Settings>) -> HttpResponse {
	HttpResponse::Ok().json(json!({
		"message": format!("{} API is Running", settings.project_name),
	}))
}

pub struct UserHandler {}

impl UserHandler {
	pub async fn signup_handler(
		repo: web::Data<dyn Repository>,
		settings: web::Data<Settings>,
		req: web::Json<UserCreate>,
	) -> Result<HttpResponse, ApiError> {
		let mut req = req.into_inner();
		req.email = req.email.trim().to_lowercase();
		req.validate()?;
		let UserCreate { email, full_name, password } = req;
		log::info!("Signing up user with email: {}", email);

		let cost = settings.bcrypt_cost;
		let hashed_password = web::block(move || bcrypt::hash(password, cost)).await?.map_err(|e| {
			log::error!("Password hashing failed for email {}: {}", email, e);
			ApiError::Internal
		})?;

		let user =
			web::block(move || repo.create_user(&email, full_name, &hashed_password)).await??;

		log::info!("Created user {}", user.id);
		Ok(HttpResponse::Ok().json(UserResponse::from(user)))
	}

	pub async fn login_handler(
		repo: web::Data<dyn Repository>,
		jwt: web::Data<JWT>,
		req: web::Json<LoginRequest>,
	) -> Result<HttpResponse, ApiError> {
		let LoginRequest { email, password } = req.into_inner();
		let email = email.trim().to_lowercase();

		let user = match web::block(move || repo.find_user_by_email(&email)).await?? {
			Some(user) => user,
			None => {
				log::warn!("Login attempt for unknown email");
				return Err(ApiError::InvalidCredentials);
			},
		};

		let hash = user.password.clone();
		let verified = web::block(move || bcrypt::verify(password, &hash)).await?.map_err(|e| {
			log::error!("Password verification failed: {}", e);
			ApiError::Internal
		})?;
		if !verified {
			log::warn!("Wrong password for user {}", user.id);
			return Err(ApiError::InvalidCredentials);
		}

		let access_token = jwt.create_jwt(user.id, &user.email).map_err(|e| {
			log::error!("JWT creation error: {:?}", e);
			ApiError::Internal
		})?;

		log::info!("Login successful for user ID: {}", user.id);
		Ok(HttpResponse::Ok().json(Token { access_token, token_type: TOKEN_TYPE.to_string() }))
	}
}

pub struct TransactionHandler {}

impl TransactionHandler {
	pub async fn list_transactions_handler(
		repo: web::Data<dyn Repository>,
		user: CurrentUser,
		page: web::Query<Pagination>,
	) -> Result<HttpResponse, ApiError> {
		page.validate()?;
		let Pagination { skip, limit } = page.into_inner();
		let user_id = user.id;

		let transactions =
			web::block(move || repo.list_transactions(user_id, skip, limit)).await??;

		log::info!(
			"Successfully retrieved {} transactions for user: {}",
			transactions.len(),
			user_id
		);
		Ok(HttpResponse::Ok().json(transactions))
	}

	pub async fn create_transaction_handler(
		repo: web::Data<dyn Repository>,
		user: CurrentUser,
		req: web::Json<TransactionFields>,
	) -> Result<HttpResponse, ApiError> {
		req.validate()?;
		let fields = req.into_inner();
		let user_id = user.id;

		let transaction = web::block(move || repo.create_transaction(user_id, fields)).await??;

		log::info!("Transaction {} created for user: {} ({})", transaction.id, user_id, user.email);
		Ok(HttpResponse::Ok().json(transaction))
	}

	pub async fn update_transaction_handler(
		repo: web::Data<dyn Repository>,
		user: CurrentUser,
		path: web::Path<i32>,
		req: web::Json<TransactionFields>,
	) -> Result<HttpResponse, ApiError> {
		req.validate()?;
		let transaction_id = path.into_inner();
		let fields = req.into_inner();
		let user_id = user.id;

		let transaction =
			web::block(move || repo.update_transaction(user_id, transaction_id, fields))
				.await?
				.inspect_err(|e| {
					log::warn!(
						"Update of transaction {} by user {} failed: {}",
						transaction_id,
						user_id,
						e
					)
				})?;

		log::info!("Transaction {} updated for user: {}", transaction_id, user_id);
		Ok(HttpResponse::Ok().json(transaction))
	}

	pub async fn delete_transaction_handler(
		repo: web::Data<dyn Repository>,
		user: CurrentUser,
		path: web::Path<i32>,
	) -> Result<HttpResponse, ApiError> {
		let transaction_id = path.into_inner();
		let user_id = user.id;

		web::block(move || repo.delete_transaction(user_id, transaction_id)).await?.inspect_err(
			|e| {
				log::warn!(
					"Delete of transaction {} by user {} failed: {}",
					transaction_id,
					user_id,
					e
				)
			},
		)?;

		log::info!("Transaction {} deleted for user: {}", transaction_id, user_id);
		Ok(HttpResponse::Ok()
			.json(MessageResponse { message: MESSAGE_TRANSACTION_DELETED.to_string() }))
	}
}

pub struct BudgetHandler {}

impl BudgetHandler {
	pub async fn list_budgets_handler(
		repo: web::Data<dyn Repository>,
		user: CurrentUser,
	) -> Result<HttpResponse, ApiError> {
		let user_id = user.id;
		let budgets = web::block(move || repo.list_budgets(user_id)).await??;

		log::info!("Successfully retrieved {} budgets for user: {}", budgets.len(), user_id);
		Ok(HttpResponse::Ok().json(budgets))
	}

	pub async fn set_budget_handler(
		repo: web::Data<dyn Repository>,
		user: CurrentUser,
		req: web::Json<BudgetFields>,
	) -> Result<HttpResponse, ApiError> {
		req.validate()?;
		let BudgetFields { category, amount } = req.into_inner();
		let user_id = user.id;

		let budget = web::block(move || repo.upsert_budget(user_id, &category, amount)).await??;

		log::info!(
			"Budget {} for category {:?} set to {} for user: {}",
			budget.id,
			budget.category,
			budget.amount,
			user_id
		);
		Ok(HttpResponse::Ok().json(budget))
	}
}
