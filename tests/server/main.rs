mod comments_api;
mod covers_api;
mod github_api;
mod health_api;
pub mod helpers;
