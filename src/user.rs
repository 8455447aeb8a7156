use rustc_hash::FxHashMap;

/// Dense index for an interned user name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct UserId(usize);

impl UserId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Interns raw user names into dense [`UserId`]s.
#[derive(Default)]
pub struct UserIds {
    by_name: FxHashMap<Box<str>, UserId>,
    names: Vec<Box<str>>,
}

impl UserIds {
    pub fn get_or_insert(&mut self, name: String) -> UserId {
        let name = name.into_boxed_str();
        match self.by_name.get(&name) {
            Some(&id) => id,
            None => {
                let id = UserId(self.names.len());
                self.names.push(name.clone());
                self.by_name.insert(name, id);
                id
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<UserId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, UserId(id): UserId) -> &str {
        &self.names[id]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Dense map from [`UserId`] to a value.
pub struct ByUser<T> {
    inner: Vec<Option<T>>,
}

impl<T> Default for ByUser<T> {
    fn default() -> Self {
        ByUser { inner: Vec::new() }
    }
}

impl<T> ByUser<T> {
    pub fn get(&self, UserId(id): UserId) -> Option<&T> {
        match self.inner.get(id) {
            Some(Some(t)) => Some(t),
            _ => None,
        }
    }

    pub fn get_mut_or_insert_with<F>(&mut self, UserId(id): UserId, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        if self.inner.len() <= id {
            self.inner.resize_with(id + 1, || None);
        }
        if self.inner[id].is_none() {
            self.inner[id] = Some(f());
        }
        self.inner[id].as_mut().unwrap()
    }

    pub fn set(&mut self, UserId(id): UserId, value: T) {
        if self.inner.len() <= id {
            self.inner.resize_with(id + 1, || None);
        }
        self.inner[id] = Some(value);
    }

    pub fn values(&self) -> &[Option<T>] {
        &self.inner
    }

    pub fn values_mut(&mut self) -> &mut [Option<T>] {
        &mut self.inner
    }
}
