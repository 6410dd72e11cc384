// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod catalogs;
mod check;
mod files;
mod window;

pub use catalogs::CatalogsCmd;
pub use check::CheckCmd;
pub use files::FilesCmd;
pub use window::WindowCmd;
