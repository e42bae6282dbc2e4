// Path conversion utilities
//
// Source positions are reported relative to the source root they were found in,
// with `/` separators on every platform.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Convert a path below `root` to a relative Unix-style path (with `/` separators)
///
/// # Examples
/// ```
/// use csdoclet::utils::to_relative_unix_style;
/// use std::path::Path;
///
/// let file = Path::new("/work/src/com/acme/MyCheck.java");
/// let relative = to_relative_unix_style(file, Path::new("/work/src")).unwrap();
/// assert_eq!(relative, "com/acme/MyCheck.java");
/// ```
pub fn to_relative_unix_style(absolute: &Path, root: &Path) -> Result<String> {
    let relative = absolute.strip_prefix(root).with_context(|| {
        format!(
            "File path '{}' is not within source root '{}'",
            absolute.display(),
            root.display()
        )
    })?;

    let path_str = relative.to_str().context("Path contains invalid UTF-8")?;

    let unix_style = if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.to_string()
    };

    Ok(unix_style)
}

/// Directory of a package below a source root: `com.acme` -> `com/acme`
pub fn package_dir(root: &Path, package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |dir, segment| dir.join(segment))
}

/// Simple name of a qualified class name: `com.acme.Outer.Inner` -> `Inner`
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit(['.', '$'])
        .next()
        .unwrap_or(qualified_name)
}
