//! Picks the navigation entry that matches the section in view.

/// One intersection observation for a page section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionHit<'a> {
    pub id: &'a str,
    pub intersecting: bool,
    pub ratio: f64,
}

/// Navigation entries keyed by the fragment they point at.
#[derive(Clone, Debug, Default)]
pub struct NavHighlight {
    targets: Vec<String>,
    active: Option<usize>,
    threshold: f64,
}

impl NavHighlight {
    /// `hrefs` are the raw link targets; a leading `#` is stripped.
    pub fn new<I, S>(hrefs: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets = hrefs
            .into_iter()
            .map(|href| {
                let href = href.as_ref();
                href.strip_prefix('#').unwrap_or(href).to_string()
            })
            .collect();
        Self {
            targets,
            active: None,
            threshold,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Applies a batch of observations in order. Each qualifying hit clears
    /// the marker and sets it on the entry targeting that section, so the
    /// last qualifying hit of the batch wins. Returns whether anything changed.
    pub fn observe(&mut self, hits: &[SectionHit<'_>]) -> bool {
        let before = self.active;
        for hit in hits {
            if !hit.intersecting || hit.ratio < self.threshold {
                continue;
            }
            self.active = self.targets.iter().position(|t| t == hit.id);
        }
        before != self.active
    }
}
