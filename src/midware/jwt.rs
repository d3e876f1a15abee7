use crate::error::ApiError;
use actix_web::{
	dev::{Payload, ServiceRequest},
	web, Error as AxError, FromRequest, HttpMessage, HttpRequest,
};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, encode, errors::Error, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
	pub iat: usize,
	pub exp: usize,
	pub sub: String,
	pub email: String,
}

pub struct JWT {
	secret: String,
	ttl_secs: usize,
}

impl JWT {
	pub fn new(s: &str, ttl_secs: usize) -> Self {
		Self { secret: s.to_string(), ttl_secs }
	}

	pub fn create_jwt(&self, user_id: i32, email: &str) -> Result<String, Error> {
		let now = Utc::now().timestamp().max(0) as usize;
		let claims = Claims {
			iat: now,
			exp: now + self.ttl_secs,
			sub: user_id.to_string(),
			email: email.to_string(),
		};
		debug!("Creating token for user {}", user_id);
		encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_ref()))
	}

	pub fn verify_jwt(&self, token: &str) -> Result<Claims, Error> {
		decode::<Claims>(
			token,
			&DecodingKey::from_secret(self.secret.as_ref()),
			&Validation::default(),
		)
		.map(|data| data.claims)
	}
}

/// Bearer validator for `HttpAuthentication::bearer`. Verified claims are
/// stored in the request extensions for [`CurrentUser`].
pub async fn jwt_validator(
	req: ServiceRequest,
	credentials: BearerAuth,
) -> Result<ServiceRequest, (AxError, ServiceRequest)> {
	let verified =
		req.app_data::<web::Data<JWT>>().map(|jwt| jwt.verify_jwt(credentials.token()));
	let verified = match verified {
		Some(verified) => verified,
		None => {
			log::error!("JWT settings are not registered as app data");
			return Err((ApiError::Internal.into(), req));
		},
	};

	match verified {
		Ok(claims) => {
			debug!("Authenticated user {} for {}", claims.sub, req.path());
			req.extensions_mut().insert(claims);
			Ok(req)
		},
		Err(e) => {
			warn!("Invalid token on {}: {:?}", req.path(), e);
			Err((ApiError::Unauthorized.into(), req))
		},
	}
}

/// Identity of the authenticated caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
	pub id: i32,
	pub email: String,
}

impl FromRequest for CurrentUser {
	type Error = ApiError;
	type Future = Ready<Result<Self, Self::Error>>;

	fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
		let user = match req.extensions().get::<Claims>() {
			Some(claims) => claims
				.sub
				.parse::<i32>()
				.map(|id| CurrentUser { id, email: claims.email.clone() })
				.map_err(|_| ApiError::Unauthorized),
			None => Err(ApiError::Unauthorized),
		};
		ready(user)
	}
}
