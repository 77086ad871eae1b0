//! Database entities (sea-orm models).

pub mod account;
pub mod budget;
pub mod budget_category;
pub mod category;
pub mod dashboard;
pub mod debt;
pub mod debt_payment;
pub mod inventory_item;
pub mod inventory_movement;
pub mod order;
pub mod order_history;
pub mod order_item;
pub mod payment;
pub mod product;
pub mod report;
pub mod report_template;
pub mod scheduled_report;
pub mod stock_audit;
pub mod stock_count;
pub mod supplier;
pub mod tracking_company;
pub mod tracking_history;
pub mod tracking_notification;
pub mod tracking_number;
pub mod transaction;
pub mod user;
pub mod user_activity;
pub mod warehouse;
