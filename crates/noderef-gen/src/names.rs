//! Identifier-safe forms of documented names

/// Documented module names that do not reduce to their require name
const IRREGULAR_MODULE_NAMES: &[(&str, &str)] = &[("tls_(ssl)", "tls"), ("Events", "events")];

/// Normalize a module (or member) name.
///
/// The irregular names are remapped first; otherwise the name is cut at its
/// first character that is neither alphanumeric nor `_`.
///
/// ```
/// use noderef_gen::names::normalize_module_name;
///
/// assert_eq!(normalize_module_name("tls_(ssl)"), "tls");
/// assert_eq!(normalize_module_name("child_process"), "child_process");
/// assert_eq!(normalize_module_name("string_decoder.StringDecoder"), "string_decoder");
/// ```
pub fn normalize_module_name(raw: &str) -> &str {
    if let Some((_, fixed)) = IRREGULAR_MODULE_NAMES.iter().find(|(from, _)| *from == raw) {
        return fixed;
    }

    match raw.find(|c: char| !(c.is_alphanumeric() || c == '_')) {
        Some(end) => &raw[..end],
        None => raw,
    }
}

/// Normalize a class name: spaces go, and a namespace qualifier up to the
/// first dot is dropped (`net.Server` becomes `Server`)
pub fn normalize_class_name(raw: &str) -> String {
    let name = raw.replace(' ', "");
    match name.split_once('.') {
        Some((_, rest)) => rest.to_string(),
        None => name,
    }
}
