//! Hand-written bodies for the `path` module stubs
//!
//! These four are the only stubs with working logic, so that tooling that
//! evaluates `require` paths can follow relative requires. Each body reads
//! `arguments` rather than its documented parameter names and carries its
//! own helpers.

/// Collapse `.`/`..` segments; `..` above the root is kept only for
/// relative paths
const NORMALIZE_ARRAY: &str = r#"function normalizeArray(parts, allowAboveRoot) {
    var res = [];
    for (var i = 0; i < parts.length; i++) {
        var p = parts[i];
        if (!p || p === '.') {
            continue;
        }
        if (p === '..') {
            if (res.length && res[res.length - 1] !== '..') {
                res.pop();
            } else if (allowAboveRoot) {
                res.push('..');
            }
        } else {
            res.push(p);
        }
    }
    return res;
}"#;

const NORMALIZE: &str = r#"var input = String(arguments[0]).replace(/\\/g, '/');
var isAbsolute = input.charAt(0) === '/';
var trailingSlash = input.substr(-1) === '/';
var result = normalizeArray(input.split('/'), !isAbsolute).join('/');
if (!result && !isAbsolute) {
    result = '.';
}
if (result && trailingSlash) {
    result += '/';
}
return (isAbsolute ? '/' : '') + result;"#;

const JOIN: &str = r#"var paths = [];
for (var i = 0; i < arguments.length; i++) {
    var segment = arguments[i];
    if (typeof segment !== 'string') {
        throw new TypeError('Arguments to path.join must be strings');
    }
    if (segment) {
        paths.push(segment.replace(/\\/g, '/'));
    }
}
var joined = paths.join('/');
var isAbsolute = joined.charAt(0) === '/';
var trailingSlash = joined.substr(-1) === '/';
var result = normalizeArray(joined.split('/'), !isAbsolute).join('/');
if (!result && !isAbsolute) {
    result = '.';
}
if (result && trailingSlash) {
    result += '/';
}
return (isAbsolute ? '/' : '') + result;"#;

const RESOLVE: &str = r#"var resolvedPath = '';
var resolvedAbsolute = false;
for (var i = arguments.length - 1; i >= -1 && !resolvedAbsolute; i--) {
    var segment = (i >= 0) ? arguments[i] : '/';
    if (typeof segment !== 'string') {
        throw new TypeError('Arguments to path.resolve must be strings');
    }
    if (!segment) {
        continue;
    }
    segment = segment.replace(/\\/g, '/');
    resolvedPath = segment + '/' + resolvedPath;
    resolvedAbsolute = segment.charAt(0) === '/';
}
resolvedPath = normalizeArray(resolvedPath.split('/'), !resolvedAbsolute).join('/');
return ((resolvedAbsolute ? '/' : '') + resolvedPath) || '.';"#;

const RELATIVE: &str = r#"function toParts(p) {
    p = String(p).replace(/\\/g, '/');
    if (p.charAt(0) !== '/') {
        p = '/' + p;
    }
    return normalizeArray(p.split('/'), false);
}
var fromParts = toParts(arguments[0]);
var toPartsList = toParts(arguments[1]);
var length = Math.min(fromParts.length, toPartsList.length);
var samePartsLength = length;
for (var i = 0; i < length; i++) {
    if (fromParts[i] !== toPartsList[i]) {
        samePartsLength = i;
        break;
    }
}
var outputParts = [];
for (var j = samePartsLength; j < fromParts.length; j++) {
    outputParts.push('..');
}
outputParts = outputParts.concat(toPartsList.slice(samePartsLength));
return outputParts.join('/');"#;

/// Module whose methods get hand-written bodies
pub const PATH_MODULE: &str = "path";

/// Body for `path.<method>`, if one is hand-written
pub fn path_method_body(method: &str) -> Option<String> {
    let body = match method {
        "relative" => RELATIVE,
        "normalize" => NORMALIZE,
        "resolve" => RESOLVE,
        "join" => JOIN,
        _ => return None,
    };
    Some(format!("{}\n{}", NORMALIZE_ARRAY, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_four_methods_have_bodies() {
        for method in ["relative", "normalize", "resolve", "join"] {
            let body = path_method_body(method).unwrap();
            assert!(body.starts_with("function normalizeArray(parts, allowAboveRoot) {"));
            assert!(body.contains("return "));
        }
        assert!(path_method_body("basename").is_none());
        assert!(path_method_body("dirname").is_none());
    }

    #[test]
    fn test_bodies_read_arguments() {
        assert!(path_method_body("normalize").unwrap().contains("arguments[0]"));
        assert!(path_method_body("relative").unwrap().contains("arguments[1]"));
    }
}
