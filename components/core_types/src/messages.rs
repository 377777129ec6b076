//! Message table for script-visible errors.
//!
//! Errors are raised by key; the key selects a template whose `{0}`, `{1}`
//! placeholders are replaced by positional arguments.

/// Templates keyed by message key.
const MESSAGES: &[(&str, &str)] = &[
    ("not.defined", "\"{0}\" is not defined"),
    ("property.not.writable", "\"{0}\" is not a writable property of {1}"),
    ("object.non.extensible", "Cannot add new property \"{0}\" to non-extensible {1}"),
    ("property.has.no.setter", "Cannot set property \"{0}\" of {1} that has only a getter"),
    ("not.a.function", "{0} is not a function"),
    ("cant.delete.property", "Cannot delete property \"{0}\" of {1}"),
];

/// Returns the template registered for `key`
pub fn template(key: &str) -> Option<&'static str> {
    MESSAGES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, template)| *template)
}

/// Formats the message for `key` with positional `args`.
///
/// Unknown keys format as the key followed by the arguments, so a missing
/// template never hides the failure.
///
/// # Examples
///
/// ```
/// use core_types::messages::format;
///
/// assert_eq!(format("not.defined", &["x"]), "\"x\" is not defined");
/// ```
pub fn format(key: &str, args: &[&str]) -> String {
    match template(key) {
        Some(template) => substitute(template, args),
        None if args.is_empty() => key.to_string(),
        None => format!("{}: {}", key, args.join(", ")),
    }
}

/// Replaces `{N}` placeholders in one pass over the template; arguments are
/// inserted verbatim and never rescanned.
fn substitute(template: &str, args: &[&str]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        message.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after.find('}').and_then(|close| {
            let index = after[..close].parse::<usize>().ok()?;
            args.get(index).map(|arg| (*arg, close))
        });
        match arg {
            Some((arg, close)) => {
                message.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                message.push('{');
                rest = after;
            }
        }
    }
    message.push_str(rest);
    message
}
