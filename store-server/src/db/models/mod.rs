//! Database Models

// Serde helpers
pub mod serde_helpers;

// Accounts
pub mod user;

// Catalog
pub mod product;

// Shopping
pub mod cart;
pub mod wishlist;

// Orders
pub mod order;

// Reviews
pub mod review;

// Re-exports
pub use user::{ProfileUpdate, SignupRequest, User, UserId, UserRole};
pub use product::{
    ColorStock, Product, ProductCreate, ProductId, ProductRatingSummary, ProductUpdate,
    StockStatus,
};
pub use cart::{Cart, CartAddItem, CartItem, CartRemoveItem, CartUpdateItem};
pub use wishlist::{Wishlist, WishlistEntry};
pub use order::{
    BillingDetails, CancelActor, CancelRequest, Order, OrderItem, OrderStatus,
    OrderWithPurchaser, PaymentMethod, PaymentStatus, PlaceOrderRequest, ShippingDetails,
    StatusEntry, StatusUpdateRequest,
};
pub use review::{Review, ReviewCreate};
