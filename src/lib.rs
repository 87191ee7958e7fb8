//! clg: class log generator.
//!
//! Dated image filenames (`YYYY[-]MM[-]DD[-author].ext`) drive two workflows:
//!
//! - [`markdown::generate_markdown`] renders one `Log-{date}.md` per date.
//! - [`upload::upload_images`] copies the images into `Log-{date}/` folders of
//!   an image-hosting git repository, commits, pushes and tags a release.
//!
//! Both take their collaborators through the traits in [`contract`], so they
//! run against mocks in tests and against the terminal and `git` in the
//! binary.

pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod git;
pub mod load_config;
pub mod markdown;
pub mod parse_name;
pub mod progress;
pub mod prompt;
pub mod remote;
pub mod scan;
pub mod template;
pub mod upload;

pub use error::{ClgError, Result};
