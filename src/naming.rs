//! Test file naming
//!
//! `src/utils/helpers.ts` becomes `src/utils/__tests__/helpers.test.ts`. Paths
//! are handled as `/`-separated strings so the result is identical on every
//! platform.

use crate::core::types::extension_of;

pub const TEST_DIR: &str = "__tests__";

/// Derive the conventional test file path for `file_path`.
///
/// The extension becomes `.test.tsx` for JSX-flavoured sources and
/// `.test.ts` for everything else.
pub fn test_file_name(file_path: &str) -> String {
    let normalized = file_path.replace('\\', "/");
    let (dir, basename) = match normalized.rsplit_once('/') {
        Some((dir, basename)) => (Some(dir), basename),
        None => (None, normalized.as_str()),
    };

    let stem = module_stem(basename);
    let test_ext = if is_jsx_flavoured(basename) { "tsx" } else { "ts" };
    let file = format!("{stem}.test.{test_ext}");

    match dir {
        Some(dir) => format!("{dir}/{TEST_DIR}/{file}"),
        None => format!("{TEST_DIR}/{file}"),
    }
}

/// File name without its extension
pub fn module_stem(file_path: &str) -> &str {
    let basename = file_path.rsplit(['/', '\\']).next().unwrap_or(file_path);
    match extension_of(basename) {
        Some(ext) => &basename[..basename.len() - ext.len() - 1],
        None => basename,
    }
}

/// Import specifier a file in the sibling `__tests__` directory uses to reach
/// `file_path`
pub fn relative_import_path(file_path: &str) -> String {
    format!("../{}", module_stem(file_path))
}

fn is_jsx_flavoured(basename: &str) -> bool {
    matches!(
        extension_of(basename).map(|ext| ext.to_ascii_lowercase()).as_deref(),
        Some("tsx") | Some("jsx")
    )
}
