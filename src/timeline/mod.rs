//! Linear mapping between calendar dates and offsets along a timeline

mod mapper;

pub(crate) use mapper::{TimelineRange, date_to_position, position_to_date};
