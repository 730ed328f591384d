pub mod filter;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod cart_service;
pub use cart_service::CartService;
pub mod form_flow;
pub mod suggestion_service;
pub use suggestion_service::SuggestionService;
