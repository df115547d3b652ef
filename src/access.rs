use crate::pattern::{PatternError, PatternList};

/// The four pattern lists that gate which callers may reach which targets.
#[derive(Clone, Debug, Default)]
pub struct AccessLists {
    pub whitelist_origins: PatternList,
    pub blacklist_origins: PatternList,
    pub whitelist_urls: PatternList,
    pub blacklist_urls: PatternList,
}

/// Which rule rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    OriginBlacklisted,
    UrlBlacklisted,
    OriginNotWhitelisted,
    UrlNotWhitelisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

impl AccessLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn whitelist_origins<I, S>(mut self, patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.whitelist_origins = PatternList::compile(patterns)?;
        Ok(self)
    }

    pub fn blacklist_origins<I, S>(mut self, patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blacklist_origins = PatternList::compile(patterns)?;
        Ok(self)
    }

    pub fn whitelist_urls<I, S>(mut self, patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.whitelist_urls = PatternList::compile(patterns)?;
        Ok(self)
    }

    pub fn blacklist_urls<I, S>(mut self, patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blacklist_urls = PatternList::compile(patterns)?;
        Ok(self)
    }

    /// Blacklists veto first; configured whitelists then require membership.
    pub fn evaluate(&self, target_url: &str, origin: Option<&str>) -> AccessDecision {
        if !self.blacklist_origins.is_empty() && self.blacklist_origins.matches(origin) {
            return AccessDecision::Deny(DenyReason::OriginBlacklisted);
        }
        if !self.blacklist_urls.is_empty() && self.blacklist_urls.matches(Some(target_url)) {
            return AccessDecision::Deny(DenyReason::UrlBlacklisted);
        }
        if !self.whitelist_origins.matches(origin) {
            return AccessDecision::Deny(DenyReason::OriginNotWhitelisted);
        }
        if !self.whitelist_urls.matches(Some(target_url)) {
            return AccessDecision::Deny(DenyReason::UrlNotWhitelisted);
        }
        AccessDecision::Allow
    }

    pub fn is_allowed(&self, target_url: &str, origin: Option<&str>) -> bool {
        self.evaluate(target_url, origin).is_allowed()
    }
}

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;
