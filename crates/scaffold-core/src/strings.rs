//! Naming transforms
//!
//! Deterministic pure functions mapping a free-form unit name to the casing
//! variants fragment builders need: `classify` for class names, `dasherize`
//! for route paths and file names, `camelize` for member names. Also builds
//! file-relative import specifiers between workspace paths.

/// `MyPage2` -> `my_page2`, `innerHTML` -> `inner_html`
#[must_use]
pub fn decamelize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in input.chars() {
        if c.is_ascii_uppercase() && prev_lower_or_digit {
            out.push('_');
        }
        prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// `my page`, `my_page`, `MyPage` -> `my-page`
#[must_use]
pub fn dasherize(input: &str) -> String {
    decamelize(input)
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}

/// `my-page`, `my_page`, `My page` -> `myPage`
#[must_use]
pub fn camelize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;
    for c in input.chars() {
        if matches!(c, '-' | '_' | '.' | ' ') {
            upper_next = !out.is_empty();
            continue;
        }
        if out.is_empty() {
            out.push(c.to_ascii_lowercase());
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `my-page`, `my page` -> `MyPage`; dotted paths keep their dots
#[must_use]
pub fn classify(input: &str) -> String {
    input
        .split('.')
        .map(|part| capitalize(&camelize(part)))
        .collect::<Vec<_>>()
        .join(".")
}

/// `MyPage`, `my-page` -> `my_page`
#[must_use]
pub fn underscore(input: &str) -> String {
    decamelize(input)
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Upper-case the first character
#[must_use]
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Relative import specifier from one workspace file to another
///
/// Both arguments are workspace-absolute (`/src/app/...`); the second may
/// omit its extension, as import specifiers do. The result always starts
/// with `./` or `../`.
#[must_use]
pub fn relative_path(from: &str, to: &str) -> String {
    let from_parts: Vec<&str> = from.trim_start_matches('/').split('/').collect();
    let to_parts: Vec<&str> = to.trim_start_matches('/').split('/').collect();

    let from_dir = &from_parts[..from_parts.len().saturating_sub(1)];
    let (to_dir, to_file) = to_parts.split_at(to_parts.len().saturating_sub(1));

    let common = from_dir
        .iter()
        .zip(to_dir.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dir.len() - common;
    let mut out = if ups == 0 {
        "./".to_string()
    } else {
        "../".repeat(ups)
    };
    for part in &to_dir[common..] {
        out.push_str(part);
        out.push('/');
    }
    out.push_str(to_file.first().unwrap_or(&""));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_variants() {
        assert_eq!(classify("my page"), "MyPage");
        assert_eq!(classify("my-page"), "MyPage");
        assert_eq!(classify("myPage"), "MyPage");
        assert_eq!(classify("web.my-page"), "Web.MyPage");
    }

    #[test]
    fn dasherize_variants() {
        assert_eq!(dasherize("MyPage"), "my-page");
        assert_eq!(dasherize("my page"), "my-page");
        assert_eq!(dasherize("my_page"), "my-page");
        assert_eq!(dasherize("innerHTML"), "inner-html");
    }

    #[test]
    fn camelize_variants() {
        assert_eq!(camelize("my-page"), "myPage");
        assert_eq!(camelize("MyPage"), "myPage");
        assert_eq!(camelize("my page"), "myPage");
    }

    #[test]
    fn underscore_variants() {
        assert_eq!(underscore("MyPage"), "my_page");
        assert_eq!(underscore("my-page"), "my_page");
    }

    #[test]
    fn decamelize_keeps_digit_boundaries() {
        assert_eq!(decamelize("Page2View"), "page2_view");
    }

    #[test]
    fn capitalize_handles_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("x"), "X");
    }

    #[test]
    fn relative_path_sibling_directory() {
        assert_eq!(
            relative_path("/src/app/app.module.ts", "/src/app/home/home.module"),
            "./home/home.module"
        );
    }

    #[test]
    fn relative_path_climbs_out() {
        assert_eq!(
            relative_path("/src/app/core/reducers/components.reducer.ts", "/src/app/home/actions"),
            "../../home/actions"
        );
    }

    #[test]
    fn relative_path_same_directory() {
        assert_eq!(relative_path("/src/app/a.ts", "/src/app/b"), "./b");
    }
}
