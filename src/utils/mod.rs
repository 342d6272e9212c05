pub(crate) mod date;
pub(crate) mod debug;
pub(crate) mod session;
pub(crate) mod timezone;

pub(crate) use date::{format_date, format_date_input, parse_date};
pub(crate) use debug::{debug_enabled, debug_log, set_debug};
pub(crate) use session::SessionScheme;
pub(crate) use timezone::Timezone;
