pub const ONE_WEEK: usize = 7 * 24 * 60 * 60;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

pub const DEFAULT_PROJECT_NAME: &str = "Finance Fusion";
pub const DEFAULT_SOCKET_URL: &str = "127.0.0.1:8000";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

pub const TOKEN_TYPE: &str = "bearer";

pub const MESSAGE_TRANSACTION_DELETED: &str = "Transaction deleted successfully";
