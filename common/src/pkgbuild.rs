use crate::errors::*;
use crate::version::Version;
use std::fmt;

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maintainer {
    pub name: String,
    pub email: String,
}

impl fmt::Display for Maintainer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "# Maintainer: {} <{}>", self.name, self.email)
    }
}

/// Right-hand side of an attribute assignment.
///
/// Both variants are written verbatim, quoting is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Scalar(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(list: Vec<String>) -> Value {
        Value::List(list)
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(list: [&str; N]) -> Value {
        Value::List(list.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: Value,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            Value::Scalar(value) => write!(f, "{}={}", self.key, value),
            Value::List(values) => write!(f, "{}=({})", self.key, values.join(" ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub body: Vec<String>,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let body = self
            .body
            .iter()
            .map(|line| format!("{}{}", INDENT, line))
            .collect::<Vec<_>>()
            .join("\n");
        write!(f, "{}() {{\n{}\n}}", self.name, body)
    }
}

/// An Arch Linux PKGBUILD assembled from maintainers, attributes and functions.
///
/// Attribute keys may repeat (`source_i686`, `source_x86_64`, ...) and are
/// emitted in insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pkgbuild {
    pub maintainers: Vec<Maintainer>,
    pub attributes: Vec<Attribute>,
    pub functions: Vec<Function>,
}

impl Pkgbuild {
    pub fn new() -> Pkgbuild {
        Pkgbuild::default()
    }

    pub fn add_maintainer<N: Into<String>, E: Into<String>>(&mut self, name: N, email: E) {
        self.maintainers.push(Maintainer {
            name: name.into(),
            email: email.into(),
        });
    }

    pub fn add_attribute<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.attributes.push(Attribute {
            key: key.into(),
            value: value.into(),
        });
    }

    pub fn add_function<N, I, S>(&mut self, name: N, body: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.functions.push(Function {
            name: name.into(),
            body: body.into_iter().map(Into::into).collect(),
        });
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

impl fmt::Display for Pkgbuild {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // blocks are separated even if one of them is empty
        let blocks = [
            join(&self.maintainers, "\n"),
            join(&self.attributes, "\n"),
            join(&self.functions, "\n\n"),
        ];
        f.write_str(&blocks.join("\n\n"))
    }
}

/// Read the declared `pkgver` from the text of an existing PKGBUILD.
pub fn read_pkgver(text: &str) -> Result<Version> {
    let line = text
        .lines()
        .find(|line| line.starts_with("pkgver"))
        .ok_or_else(|| format_err!("PKGBUILD does not declare a pkgver"))?;
    let (_, value) = line
        .split_once('=')
        .ok_or_else(|| format_err!("Malformed pkgver line: {:?}", line))?;
    let version = Version::parse(value)
        .context("Failed to parse current version from PKGBUILD")?;
    Ok(version)
}
