// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# gitbatch configuration

[batch]
# Maximum number of files per commit
batch_size = 25
# Remote branch each batch is pushed to
branch = "master"
remote = "origin"
# "ls-files" or "status"
strategy = "ls-files"
# "auto" passes paths as arguments, "always" uses a pathspec file
pathspec = "auto"
track_processed = true
tolerate_empty_commit = true

[ui]
color = true
emoji = true
confirm = false
"#
}
