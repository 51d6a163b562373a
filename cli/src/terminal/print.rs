// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use serde::Serialize;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

/// Width of the key column in detail trees.
const KEY_WIDTH: usize = "Interface".len();

/// Target routed to stdout by the logging layer.
pub const PRINT_TARGET: &str = "netinfo::print";

#[macro_export]
macro_rules! nprint {
    () => {
        $crate::nprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "netinfo::print",
            raw_msg = %format_args!($($arg)*)
        );
    };
}

/// Machine-readable output bypasses the tree renderer entirely.
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    nprint!("{}", line);
}

pub fn divider() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    nprint!("{}", sep);
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    nprint!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    );
}

pub fn tree_head(idx: usize, name: ColoredString, suffix: ColoredString) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    nprint!("{} {} {}", idx_str.color(colors::SEPARATOR), name, suffix);
}

pub fn as_tree(details: Vec<(String, ColoredString)>) {
    for (i, (key, value)) in details.iter().enumerate() {
        let last: bool = i + 1 == details.len();
        let branch: ColoredString = if !last { "├─" } else { "└─" }.bright_black();

        let dots_count: usize = KEY_WIDTH.saturating_sub(key.len());
        let dots: ColoredString = ".".repeat(dots_count).color(colors::SEPARATOR);

        nprint!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots,
            ":".color(colors::SEPARATOR),
            value
        );
    }
}
