pub mod animation;
pub mod fetch;
pub mod visitor_display;

pub use crate::domain::model::{
    CountResponse, DisplayOutcome, DisplayState, DisplayedCount, ResponseShape,
};
pub use crate::domain::ports::{ConfigProvider, CountDisplay, CountSource};
pub use crate::utils::error::Result;
