use super::{HeaderName, HeaderValue, Headers, standard::SET_COOKIE};

/// Sorted and combined snapshot of the stored entries.
///
/// Entries are stably sorted by name so same name values stay in append order, then every run of
/// the same name is folded into one pair, except `set-cookie`.
fn snapshot(headers: &Headers) -> Vec<(HeaderName, HeaderValue)> {
    let mut sorted: Vec<&(HeaderName, HeaderValue)> = headers.raw_entries().iter().collect();
    sorted.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut output = Vec::with_capacity(sorted.len());
    let mut rest = sorted.as_slice();

    while let [(name, value), tail @ ..] = rest {
        if *name == SET_COOKIE {
            output.push((name.clone(), value.clone()));
            rest = tail;
            continue;
        }

        let run = tail.iter().take_while(|(n, _)| n == name).count();
        let value = match run {
            0 => value.clone(),
            _ => HeaderValue::join(
                std::iter::once(value).chain(tail[..run].iter().map(|(_, v)| v)),
            ),
        };
        output.push((name.clone(), value));
        rest = &tail[run..];
    }

    output
}

/// Snapshot iterator over name and value pairs.
///
/// This struct is returned from [`Headers::entries`].
#[derive(Debug)]
pub struct Iter {
    iter: std::vec::IntoIter<(HeaderName, HeaderValue)>,
}

impl Iter {
    pub(crate) fn new(headers: &Headers) -> Self {
        Self {
            iter: snapshot(headers).into_iter(),
        }
    }
}

impl Iterator for Iter {
    type Item = (HeaderName, HeaderValue);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Iter { }

impl DoubleEndedIterator for Iter {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl std::iter::FusedIterator for Iter { }

// ===== Keys =====

/// Snapshot iterator over header names.
///
/// This struct is returned from [`Headers::keys`].
#[derive(Debug)]
pub struct Keys {
    iter: Iter,
}

impl Keys {
    pub(crate) fn new(headers: &Headers) -> Self {
        Self {
            iter: Iter::new(headers),
        }
    }
}

impl Iterator for Keys {
    type Item = HeaderName;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(name, _)| name)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Keys { }

// ===== Values =====

/// Snapshot iterator over combined header values.
///
/// This struct is returned from [`Headers::values`].
#[derive(Debug)]
pub struct Values {
    iter: Iter,
}

impl Values {
    pub(crate) fn new(headers: &Headers) -> Self {
        Self {
            iter: Iter::new(headers),
        }
    }
}

impl Iterator for Values {
    type Item = HeaderValue;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Values { }

// ===== GetAll =====

/// Iterator over every stored value of a header name, in append order.
///
/// This struct is returned from [`Headers::get_all`].
#[derive(Debug)]
pub struct GetAll<'a> {
    iter: std::slice::Iter<'a, (HeaderName, HeaderValue)>,
    name: HeaderName,
}

impl<'a> GetAll<'a> {
    pub(crate) fn new(entries: &'a [(HeaderName, HeaderValue)], name: HeaderName) -> Self {
        Self {
            iter: entries.iter(),
            name,
        }
    }
}

impl<'a> Iterator for GetAll<'a> {
    type Item = &'a HeaderValue;

    fn next(&mut self) -> Option<Self::Item> {
        let name = &self.name;
        self.iter.find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}
