/// Element id an in-page link points at, or `None` for a bare `#`, an empty
/// fragment, or a link that leaves the page.
pub fn fragment_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// How the viewport should travel to an anchor target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Travel {
    Smooth,
    Instant,
}

impl Travel {
    pub fn for_motion(reduced_motion: bool) -> Self {
        if reduced_motion {
            Travel::Instant
        } else {
            Travel::Smooth
        }
    }
}
