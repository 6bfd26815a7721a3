pub mod dto;
pub mod opt_detail;

pub use opt_detail::OptDetail;
