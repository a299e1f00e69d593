//! Intrinsic function vocabulary
//!
//! Short-form YAML tags (`!GetAtt`) and their long-form map keys
//! (`Fn::GetAtt`). Rule functions have no `Fn::` prefix in long form.

const INTRINSICS: &[(&str, &str)] = &[
    ("Ref", "Ref"),
    ("GetAtt", "Fn::GetAtt"),
    ("Sub", "Fn::Sub"),
    ("Join", "Fn::Join"),
    ("Select", "Fn::Select"),
    ("Split", "Fn::Split"),
    ("FindInMap", "Fn::FindInMap"),
    ("If", "Fn::If"),
    ("Not", "Fn::Not"),
    ("Equals", "Fn::Equals"),
    ("And", "Fn::And"),
    ("Or", "Fn::Or"),
    ("Base64", "Fn::Base64"),
    ("Cidr", "Fn::Cidr"),
    ("ImportValue", "Fn::ImportValue"),
    ("GetAZs", "Fn::GetAZs"),
    ("Condition", "Condition"),
    ("Transform", "Fn::Transform"),
    ("ToJsonString", "Fn::ToJsonString"),
    ("Length", "Fn::Length"),
    ("Contains", "Fn::Contains"),
    ("EachMemberEquals", "Fn::EachMemberEquals"),
    ("EachMemberIn", "Fn::EachMemberIn"),
    ("RefAll", "Fn::RefAll"),
    ("ValueOf", "Fn::ValueOf"),
    ("ValueOfAll", "Fn::ValueOfAll"),
];

/// Tag names without the leading `!`
pub fn intrinsic_tags() -> impl Iterator<Item = &'static str> {
    INTRINSICS.iter().map(|(tag, _)| *tag)
}

/// Whether `tag` (with or without `!`) is a recognized short form
pub fn is_intrinsic_tag(tag: &str) -> bool {
    let name = tag.strip_prefix('!').unwrap_or(tag);
    INTRINSICS.iter().any(|(short, _)| *short == name)
}

/// Long-form key for a short-form tag
pub fn long_form(tag: &str) -> Option<&'static str> {
    let name = tag.strip_prefix('!').unwrap_or(tag);
    INTRINSICS
        .iter()
        .find(|(short, _)| *short == name)
        .map(|(_, long)| *long)
}

/// Canonical short name for a map key naming an intrinsic
///
/// Accepts the long form (`Fn::Join`), the bare short form (`Ref`) and the
/// rewritten tag form (`!Join`).
pub fn intrinsic_name(key: &str) -> Option<&'static str> {
    if let Some(tag) = key.strip_prefix('!') {
        return INTRINSICS
            .iter()
            .find(|(short, _)| *short == tag)
            .map(|(short, _)| *short);
    }
    INTRINSICS
        .iter()
        .find(|(_, long)| *long == key)
        .map(|(short, _)| *short)
}
