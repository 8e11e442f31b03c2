//! Request options and the rules for combining them.
//!
//! [`Options`] is a sparse overlay: a field that is not set never overrides
//! one that is. Several option values are combined with [`Options::merge`].

use crate::error::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::fmt;

/// An opt-in or opt-out API behaviour, sent as `Asana-Enable` or
/// `Asana-Disable` request headers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Feature {
    /// `new_task_subtypes`
    NewTaskSubtypes,
    /// `new_sections`
    NewSections,
    /// `string_ids`
    StringIds,
    /// Any other feature by its wire name.
    Other(String),
}

impl Feature {
    /// The wire name of the feature.
    pub fn as_str(&self) -> &str {
        match self {
            Feature::NewTaskSubtypes => "new_task_subtypes",
            Feature::NewSections => "new_sections",
            Feature::StringIds => "string_ids",
            Feature::Other(name) => name,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Feature {
    fn from(name: &str) -> Self {
        match name {
            "new_task_subtypes" => Feature::NewTaskSubtypes,
            "new_sections" => Feature::NewSections,
            "string_ids" => Feature::StringIds,
            other => Feature::Other(other.to_string()),
        }
    }
}

/// Controls how a request is interpreted and how the response is shaped.
///
/// For GET requests options become `opt_*` query parameters (plus `limit`
/// and `offset`). For POST and PUT requests they are sent in the body as the
/// `options` sibling of `data`. Feature toggles always travel as headers.
///
/// # Examples
///
/// ```
/// use asana_client::{Feature, Options};
///
/// let options = Options::new()
///     .fields(["name", "assignee.name"])
///     .limit(50)
///     .enable(Feature::NewSections);
///
/// assert_eq!(options.limit, Some(50));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Pretty-print the response. Useful only while debugging.
    pub pretty: Option<bool>,
    /// Override the HTTP method of a POST. Never sent with GET.
    pub method: Option<String>,
    /// The exact set of fields to return. Takes precedence over `expand`.
    pub fields: Vec<String>,
    /// Sub-objects to return in full rather than compact form.
    pub expand: Vec<String>,
    /// Wrap the response in a JSON-P callback of this name.
    pub jsonp: Option<String>,
    /// The page size for list endpoints.
    pub limit: Option<u32>,
    /// The opaque cursor returned as [`NextPage::offset`](crate::NextPage).
    pub offset: Option<String>,
    /// Ask for the `Asana-Fast-Api` behaviour.
    pub fast_api: Option<bool>,
    /// Features to opt into.
    pub enable: Vec<Feature>,
    /// Features to opt out of.
    pub disable: Vec<Feature>,
}

impl Options {
    /// Creates an empty set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds fields to select.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        union_into(&mut self.fields, fields.into_iter().map(Into::into));
        self
    }

    /// Adds sub-objects to expand.
    pub fn expand<I, S>(mut self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        union_into(&mut self.expand, expand.into_iter().map(Into::into));
        self
    }

    /// Sets `opt_pretty`.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = Some(pretty);
        self
    }

    /// Sets the JSON-P callback name.
    pub fn jsonp(mut self, callback: impl Into<String>) -> Self {
        self.jsonp = Some(callback.into());
        self
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page cursor.
    pub fn offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    /// Sets the method override.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the fast API toggle.
    pub fn fast_api(mut self, fast_api: bool) -> Self {
        self.fast_api = Some(fast_api);
        self
    }

    /// Opts into a feature.
    pub fn enable(mut self, feature: impl Into<Feature>) -> Self {
        union_into(&mut self.enable, [feature.into()]);
        self
    }

    /// Opts out of a feature.
    pub fn disable(mut self, feature: impl Into<Feature>) -> Self {
        union_into(&mut self.disable, [feature.into()]);
        self
    }

    /// Selects every field known for `T`.
    pub fn fields_of<T: crate::resources::FieldSet>() -> Self {
        Self::new().fields(T::FIELDS.iter().copied())
    }

    /// Returns `true` if no option is set.
    pub fn is_empty(&self) -> bool {
        *self == Options::default()
    }

    /// Overlays `other` on top of `self`.
    ///
    /// Set scalars in `other` replace those in `self`, and so does a
    /// non-empty `fields` or `expand` list. Feature sets are unioned,
    /// keeping first-seen order.
    pub fn overlay(&mut self, other: &Options) {
        overlay_scalar(&mut self.pretty, &other.pretty);
        overlay_scalar(&mut self.method, &other.method);
        overlay_scalar(&mut self.jsonp, &other.jsonp);
        overlay_scalar(&mut self.limit, &other.limit);
        overlay_scalar(&mut self.offset, &other.offset);
        overlay_scalar(&mut self.fast_api, &other.fast_api);
        overlay_list(&mut self.fields, &other.fields);
        overlay_list(&mut self.expand, &other.expand);
        union_into(&mut self.enable, other.enable.iter().cloned());
        union_into(&mut self.disable, other.disable.iter().cloned());
    }

    /// Combines client defaults with per-call options.
    ///
    /// Precedence, lowest first: `defaults`, then each entry of `calls` in
    /// order. The result is checked with [`Options::check_encodable`].
    ///
    /// # Examples
    ///
    /// ```
    /// use asana_client::Options;
    ///
    /// let defaults = Options::new().limit(100).pretty(true);
    /// let merged = Options::merge(&[Options::new().limit(10)], &defaults).unwrap();
    ///
    /// assert_eq!(merged.limit, Some(10));
    /// assert_eq!(merged.pretty, Some(true));
    /// ```
    pub fn merge(calls: &[Options], defaults: &Options) -> Result<Options> {
        let mut merged = defaults.clone();
        for options in calls {
            merged.overlay(options);
        }
        merged.check_encodable()?;
        Ok(merged)
    }

    /// Fails with [`Error::Encoding`] if a value cannot be represented as
    /// a query parameter or header.
    pub fn check_encodable(&self) -> Result<()> {
        for (name, list) in [("opt_fields", &self.fields), ("opt_expand", &self.expand)] {
            for item in list.iter() {
                check_list_item(name, item)?;
            }
        }
        for (name, list) in [("Asana-Enable", &self.enable), ("Asana-Disable", &self.disable)] {
            for feature in list.iter() {
                check_list_item(name, feature.as_str())?;
            }
        }
        if let Some(jsonp) = &self.jsonp {
            if jsonp.is_empty() || jsonp.chars().any(char::is_control) {
                return Err(Error::Encoding(format!(
                    "opt_jsonp has an invalid callback name: {:?}",
                    jsonp
                )));
            }
        }
        if let Some(offset) = &self.offset {
            if offset.chars().any(char::is_control) {
                return Err(Error::Encoding(format!(
                    "offset contains control characters: {:?}",
                    offset
                )));
            }
        }
        Ok(())
    }

    /// Encodes the options as query parameters, in a fixed order.
    pub fn to_query_pairs(&self) -> Result<Vec<(String, String)>> {
        self.check_encodable()?;

        let mut pairs = Vec::new();
        if let Some(pretty) = self.pretty {
            pairs.push(("opt_pretty".to_string(), pretty.to_string()));
        }
        if !self.fields.is_empty() {
            pairs.push(("opt_fields".to_string(), self.fields.join(",")));
        }
        if !self.expand.is_empty() {
            pairs.push(("opt_expand".to_string(), self.expand.join(",")));
        }
        if let Some(jsonp) = &self.jsonp {
            pairs.push(("opt_jsonp".to_string(), jsonp.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = &self.offset {
            pairs.push(("offset".to_string(), offset.clone()));
        }
        Ok(pairs)
    }

    /// The representation sent as the `options` member of a request body,
    /// or `None` when nothing would be sent.
    pub(crate) fn to_body(&self) -> Option<BodyOptions<'_>> {
        let body = BodyOptions {
            pretty: self.pretty,
            method: self.method.as_deref(),
            fields: &self.fields,
            expand: &self.expand,
            jsonp: self.jsonp.as_deref(),
            limit: self.limit,
            offset: self.offset.as_deref(),
        };
        if body.is_empty() {
            None
        } else {
            Some(body)
        }
    }

    /// Adds the feature headers for these options.
    pub fn apply_headers(&self, headers: &mut HeaderMap) -> Result<()> {
        if self.fast_api == Some(true) {
            headers.insert(
                HeaderName::from_static("asana-fast-api"),
                HeaderValue::from_static("true"),
            );
        }
        for (name, features) in [("asana-enable", &self.enable), ("asana-disable", &self.disable)] {
            if features.is_empty() {
                continue;
            }
            let value = join_features(features);
            let value = HeaderValue::from_str(&value)
                .map_err(|e| Error::Encoding(format!("Invalid {} header: {}", name, e)))?;
            headers.insert(HeaderName::from_static(name), value);
        }
        Ok(())
    }
}

/// The body form of [`Options`].
#[derive(Debug, Serialize)]
pub(crate) struct BodyOptions<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pretty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_list")]
    fields: &'a [String],
    #[serde(skip_serializing_if = "is_empty_list")]
    expand: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    jsonp: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<&'a str>,
}

impl BodyOptions<'_> {
    fn is_empty(&self) -> bool {
        self.pretty.is_none()
            && self.method.is_none()
            && self.fields.is_empty()
            && self.expand.is_empty()
            && self.jsonp.is_none()
            && self.limit.is_none()
            && self.offset.is_none()
    }
}

fn is_empty_list(list: &&[String]) -> bool {
    list.is_empty()
}

fn overlay_scalar<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if let Some(value) = source {
        *target = Some(value.clone());
    }
}

fn overlay_list(target: &mut Vec<String>, other: &[String]) {
    if !other.is_empty() {
        *target = other.to_vec();
    }
}

fn union_into<T: PartialEq>(target: &mut Vec<T>, items: impl IntoIterator<Item = T>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

fn check_list_item(name: &str, item: &str) -> Result<()> {
    if item.is_empty() || item.contains(',') || item.chars().any(char::is_control) {
        return Err(Error::Encoding(format!(
            "{} entry {:?} cannot be encoded in a comma-separated list",
            name, item
        )));
    }
    Ok(())
}

fn join_features(features: &[Feature]) -> String {
    features
        .iter()
        .map(Feature::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
