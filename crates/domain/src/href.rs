use galaxy_rbac_core::{AppError, AppResult};

/// Extracts the trailing identifier segment of a resource href.
///
/// `/api/galaxy/pulp/api/v3/repositories/ansible/ansible/<id>/` yields `<id>`.
pub fn href_resource_id(href: &str) -> AppResult<&str> {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| AppError::Validation(format!("href '{href}' has no identifier segment")))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::href_resource_id;

    #[test]
    fn repository_href_yields_uuid() {
        let id = href_resource_id(
            "/api/galaxy/pulp/api/v3/repositories/ansible/ansible/0190c1b4-6a5e-7b8f-9d2a-3c4e5f6a7b8c/",
        );
        assert_eq!(
            id.unwrap_or_default(),
            "0190c1b4-6a5e-7b8f-9d2a-3c4e5f6a7b8c"
        );
    }

    #[test]
    fn bare_slash_is_rejected() {
        assert!(href_resource_id("/").is_err());
        assert!(href_resource_id("").is_err());
    }

    proptest! {
        #[test]
        fn last_segment_is_returned_with_or_without_trailing_slash(
            prefix in "(/[a-z0-9]{1,8}){0,6}",
            id in "[a-z0-9-]{1,36}",
            trailing in proptest::bool::ANY,
        ) {
            let href = format!("{prefix}/{id}{}", if trailing { "/" } else { "" });
            prop_assert_eq!(href_resource_id(&href).ok(), Some(id.as_str()));
        }
    }
}
