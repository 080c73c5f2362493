// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pretty printers for reporting information as a tree, e.g.
//!
//! ```text
//! Time window (0, 10)
//! ├ 2 of 6 time bins selected
//! └ Total counts: 1234
//! ```

use std::{borrow::Cow, sync::Mutex};

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNING_PRINTER: Mutex<Vec<Vec<Cow<'static, str>>>> = Mutex::new(vec![]);
}

/// The tree symbol to start a line with.
fn symbol(i_line: usize, last_line: bool, last_block: bool) -> char {
    match (i_line, last_line, last_block) {
        (0, false, _) => VERTICAL_AND_RIGHT,
        (0, _, false) => VERTICAL_AND_RIGHT,
        (0, true, true) => UP_AND_RIGHT,
        _ => VERTICAL,
    }
}

pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    /// Lines after the first are continuations of the first.
    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.push(block);
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(self.title).bold());
        let num_blocks = self.blocks.len();
        for (i_block, block) in self.blocks.into_iter().enumerate() {
            let num_lines = block.len();
            for (i_line, line) in block.into_iter().enumerate() {
                let symbol = symbol(i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks);
                log::info!("{symbol} {line}");
            }
        }
        log::info!("");
    }
}

pub(crate) trait Warn {
    fn warn(self);
}

impl Warn for String {
    fn warn(self) {
        WARNING_PRINTER.lock().unwrap().push(vec![self.into()]);
    }
}

/// Print out any warnings that have been collected, then forget them.
pub(crate) fn display_warnings() {
    let mut blocks = WARNING_PRINTER.lock().unwrap();
    log::debug!("Displaying warnings");
    if blocks.is_empty() {
        return;
    }

    log::warn!("{}", console::style("Warnings").bold());
    let num_blocks = blocks.len();
    for (i_block, block) in blocks.iter().enumerate() {
        let num_lines = block.len();
        for (i_line, line) in block.iter().enumerate() {
            let symbol = symbol(i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks);
            log::warn!("{symbol} {line}");
        }
    }
    log::warn!("");
    blocks.clear();
}
