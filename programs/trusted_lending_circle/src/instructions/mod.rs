pub mod admin;
pub mod circle;
pub mod contribute;
pub mod custody;
pub mod lifecycle;
pub mod membership;
pub mod trust_list;
pub mod view;
