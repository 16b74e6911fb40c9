//! Turns client supplied path arguments into safe absolute virtual paths.

/// Takes a client supplied path or filename and generates a safe absolute
/// path within their account sandbox.
///
/// ```text
/// build_path("/", "/")                      => "/"
/// build_path("/", "one.txt")                => "/one.txt"
/// build_path("/any", "/files/two.txt")      => "/files/two.txt"
/// build_path("/", "files/two.txt")          => "/files/two.txt"
/// build_path("/", "/../../../../etc/passwd") => "/etc/passwd"
/// ```
///
/// The literal `-a` counts as "no filename" because list flags can end up as
/// the whole parameter. The sanitisation here is purely lexical; the driver
/// decides what, if anything, the result maps to.
pub(crate) fn build_path(name_prefix: &str, filename: &str) -> String {
    if filename.starts_with('/') {
        clean(filename)
    } else if !filename.is_empty() && filename != "-a" {
        clean(&format!("{}/{}", name_prefix, filename))
    } else {
        clean(name_prefix)
    }
}

// Lexically normalises a path: `/` separators only, no empty or `.` segments,
// `..` resolved without ever climbing above the root.
fn clean(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split(|c| c == '/' || c == std::path::MAIN_SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    let mut cleaned = String::from("/");
    cleaned.push_str(&parts.join("/"));
    cleaned
}

/// Splits a LIST/NLST parameter into flags and path: leading `-x` tokens are
/// skipped and the path is everything from the last flag onward, so paths
/// containing spaces survive.
pub(crate) fn parse_list_param(param: &str) -> &str {
    if param.is_empty() {
        return param;
    }
    let mut i: usize = 0;
    for field in param.split_whitespace() {
        if !field.starts_with('-') {
            break;
        }
        let pattern = format!(" {}", field);
        let pos = param.rfind(&pattern).map(|p| p as i64).unwrap_or(-1);
        i = (pos + field.len() as i64 + 1) as usize;
    }
    param[i..].trim_start_matches(' ')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_path_normative_table() {
        assert_eq!(build_path("/", "/"), "/");
        assert_eq!(build_path("/", "one.txt"), "/one.txt");
        assert_eq!(build_path("/any", "/files/two.txt"), "/files/two.txt");
        assert_eq!(build_path("/", "files/two.txt"), "/files/two.txt");
        assert_eq!(build_path("/", "/../../../../etc/passwd"), "/etc/passwd");
        assert_eq!(build_path("/files", ""), "/files");
        assert_eq!(build_path("/files", "-a"), "/files");
    }

    #[test]
    fn build_path_is_relative_to_the_prefix() {
        assert_eq!(build_path("/docs", "a.txt"), "/docs/a.txt");
        assert_eq!(build_path("/docs", ".."), "/");
        assert_eq!(build_path("/docs/sub", "../x"), "/docs/x");
    }

    #[test]
    fn build_path_collapses_doubled_separators() {
        assert_eq!(build_path("/", "a//b"), "/a/b");
        assert_eq!(build_path("/a/", "b"), "/a/b");
        assert_eq!(build_path("/", "./a/./b"), "/a/b");
    }

    #[test]
    fn build_path_never_leaves_dotdot_behind() {
        for (prefix, file) in [
            ("/", "../../x"),
            ("/deep/down", "../../../../up"),
            ("/", "/a/../../../b"),
            ("/x", "a/../b/../.."),
        ] {
            let built = build_path(prefix, file);
            assert!(built.starts_with('/'), "{} not absolute", built);
            assert!(!built.split('/').any(|s| s == ".."), "{} contains ..", built);
        }
    }

    #[test]
    fn list_param_without_flags_is_the_path() {
        assert_eq!(parse_list_param(""), "");
        assert_eq!(parse_list_param("/tmp"), "/tmp");
        assert_eq!(parse_list_param("path with spaces"), "path with spaces");
    }

    #[test]
    fn list_param_skips_leading_flags() {
        assert_eq!(parse_list_param("-a"), "");
        assert_eq!(parse_list_param("-la /tmp"), "/tmp");
        assert_eq!(parse_list_param("-a -l /dir with space"), "/dir with space");
    }
}
