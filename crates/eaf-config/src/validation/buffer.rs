//! Buffer defaults and dispatch pacing.

use crate::schema::EafConfig;

use super::helpers::{validate_hex_color, validate_range};

/// Largest buffer side accepted from config.
const MAX_SIDE: u32 = 16_384;

pub(crate) fn validate_buffer(errors: &mut Vec<String>, config: &EafConfig) {
    let buffer = &config.buffer;
    validate_range(errors, "buffer.default_width", buffer.default_width, 1, MAX_SIDE);
    validate_range(errors, "buffer.default_height", buffer.default_height, 1, MAX_SIDE);
    validate_hex_color(errors, "buffer.background_color", &buffer.background_color);
}

pub(crate) fn validate_dispatch(errors: &mut Vec<String>, config: &EafConfig) {
    validate_range(
        errors,
        "dispatch.max_tasks_per_drain",
        config.dispatch.max_tasks_per_drain,
        1,
        65_536,
    );
    validate_range(
        errors,
        "dispatch.poll_interval_ms",
        config.dispatch.poll_interval_ms,
        1,
        1_000,
    );
}
