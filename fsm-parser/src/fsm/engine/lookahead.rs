//! Single item lookahead over a fragment source
//!
//! Recognizers only ever examine the fragment at the head of the input, constructors consume
//! it. [Lookahead] keeps those two apart: `peek` fills a one element cache on demand, `next`
//! drains it (or pulls straight from the source when the cache is empty). The source is never
//! rewound past that single item.

use std::fmt;

pub struct Lookahead<'p, F> {
    source: Box<dyn Iterator<Item = F> + 'p>,
    cached: Option<F>,
}

impl<'p, F> Lookahead<'p, F> {
    /// Wrap any forward-only fragment source.
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = F>,
        I::IntoIter: 'p,
    {
        Lookahead {
            source: Box::new(source.into_iter().fuse()),
            cached: None,
        }
    }

    /// The next fragment without consuming it, or `None` once the source is exhausted.
    pub fn peek(&mut self) -> Option<&F> {
        if self.cached.is_none() {
            self.cached = self.source.next();
        }
        self.cached.as_ref()
    }

    pub fn is_exhausted(&mut self) -> bool {
        self.peek().is_none()
    }
}

impl<F> Iterator for Lookahead<'_, F> {
    type Item = F;

    fn next(&mut self) -> Option<F> {
        self.cached.take().or_else(|| self.source.next())
    }
}

impl<F: fmt::Debug> fmt::Debug for Lookahead<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookahead")
            .field("cached", &self.cached)
            .finish_non_exhaustive()
    }
}
