pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::create_router;
pub use server::serve;
pub use state::AppState;
