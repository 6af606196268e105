//! 外部服务模块
//!
//! - [`MailerService`] - 事务邮件 (HTTP mail API, best effort)
//! - [`PaymentService`] - 支付意向与汇率

pub mod mailer;
pub mod payments;

pub use mailer::{MailError, MailerService};
pub use payments::PaymentService;
