//! 下单流程模块
//!
//! - [`order_number`] - 订单号分配 (有界随机重试)
//! - [`inventory`] - 库存扣减 (纯函数)
//! - [`workflow`] - 下单与状态流转编排

pub mod inventory;
pub mod order_number;
pub mod workflow;

pub use inventory::{StockAdjustment, apply_line_item};
pub use workflow::{StatusChange, cancel_own_order, place_order, transition_status};
