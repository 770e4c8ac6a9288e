// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use timeline_cli::App;

fn main() -> Result<()> {
    color_eyre::install()?;
    timeline_cli::init_logger();

    let app = App::parse();
    app.exec()
}
