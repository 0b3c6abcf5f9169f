//! Value codec for RBXLX property fragments.
//!
//! Every property in an item's `<Properties>` container is a small XML
//! fragment whose shape depends on its type tag. This module maps a fragment
//! to a single display value ([`decode`]) and writes an edited string back into
//! it ([`encode`]), keeping whatever representation the fragment already used.
//!
//! Scalars carry their value as a `value` attribute, as CDATA, or as element
//! text, checked in that order. Compound types carry named numeric fields as
//! child elements:
//!
//! | Type                 | Fields                                     | Display               |
//! |----------------------|--------------------------------------------|-----------------------|
//! | `Vector3`            | X Y Z                                      | `1, 2, 3`             |
//! | `Vector2`            | X Y                                        | `1, 2`                |
//! | `Color3`             | R G B                                      | `1, 0.5, 0`           |
//! | `CoordinateFrame`    | X Y Z R00 R01 R02 R10 R11 R12 R20 R21 R22  | space separated       |
//! | `PhysicalProperties` | CustomPhysics + five overrides             | `false` or five values|
//!
//! Decoding never fails. Encoding leaves the fragment untouched and reports
//! [`EditOutcome::Unchanged`] when the input does not fit the type's grammar.

use std::fmt;

use rbxlx_dom::RawNode;

/// Attribute that carries a scalar value inline.
const VALUE_ATTR: &str = "value";

/// Type tag of script bodies and other protected strings.
pub const PROTECTED_STRING: &str = "ProtectedString";

const VECTOR3_FIELDS: &[&str] = &["X", "Y", "Z"];
const VECTOR2_FIELDS: &[&str] = &["X", "Y"];
const COLOR3_FIELDS: &[&str] = &["R", "G", "B"];
const CFRAME_FIELDS: &[&str] = &[
    "X", "Y", "Z", "R00", "R01", "R02", "R10", "R11", "R12", "R20", "R21", "R22",
];
const PHYSICS_FLAG: &str = "CustomPhysics";
const PHYSICS_OVERRIDES: &[&str] = &[
    "Density",
    "Friction",
    "Elasticity",
    "FrictionWeight",
    "ElasticityWeight",
];

/// Compound property types with a known field layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundType {
    Vector3,
    Vector2,
    Color3,
    CoordinateFrame,
    PhysicalProperties,
}

impl CompoundType {
    /// Look up a compound type by its property-type tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Vector3" => Some(Self::Vector3),
            "Vector2" => Some(Self::Vector2),
            "Color3" => Some(Self::Color3),
            "CoordinateFrame" => Some(Self::CoordinateFrame),
            "PhysicalProperties" => Some(Self::PhysicalProperties),
            _ => None,
        }
    }

    /// Numeric field names in their fixed order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Vector3 => VECTOR3_FIELDS,
            Self::Vector2 => VECTOR2_FIELDS,
            Self::Color3 => COLOR3_FIELDS,
            Self::CoordinateFrame => CFRAME_FIELDS,
            Self::PhysicalProperties => PHYSICS_OVERRIDES,
        }
    }
}

/// How a property fragment stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Scalar in a `value` attribute.
    Attribute,
    /// Scalar in a CDATA section.
    Cdata,
    /// Scalar in element text.
    Text,
    /// Known compound type with named child fields.
    Compound(CompoundType),
    /// Nested fields of a type with no encode rule; passed through as-is.
    Unknown,
    /// Scalar with no value at all.
    Empty,
}

impl FragmentKind {
    /// Classify a fragment by its tag and shape.
    pub fn classify(fragment: &RawNode) -> Self {
        if let Some(compound) = CompoundType::from_tag(&fragment.tag) {
            return Self::Compound(compound);
        }

        if fragment.attribute(VALUE_ATTR).is_some() {
            Self::Attribute
        } else if fragment.cdata.is_some() {
            Self::Cdata
        } else if fragment.text.is_some() {
            Self::Text
        } else if !fragment.children.is_empty() {
            Self::Unknown
        } else {
            Self::Empty
        }
    }
}

/// Decoded display/edit value of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// No value present.
    Empty,
    /// A single display string.
    Text(String),
    /// Field name to value mapping for compounds without an encode rule.
    Fields(Vec<(String, String)>),
}

impl PropertyValue {
    /// The display string, if this is a single value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// True for [`PropertyValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("(empty)"),
            Self::Text(text) => f.write_str(text),
            Self::Fields(fields) => {
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for PropertyValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Fields(fields) => {
                serializer.collect_map(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            }
        }
    }
}

/// Result of writing a value into a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The fragment was updated.
    Applied,
    /// The input did not fit the type's grammar; the fragment is untouched.
    Unchanged,
}

/// Decode a property fragment to its display value.
pub fn decode(fragment: &RawNode) -> PropertyValue {
    match FragmentKind::classify(fragment) {
        FragmentKind::Attribute | FragmentKind::Cdata | FragmentKind::Text => {
            scalar_text(fragment).map_or(PropertyValue::Empty, |v| PropertyValue::Text(v.to_string()))
        }
        FragmentKind::Empty => PropertyValue::Empty,
        FragmentKind::Unknown => PropertyValue::Fields(
            fragment
                .children
                .iter()
                .map(|child| (child.tag.clone(), field_text(child)))
                .collect(),
        ),
        FragmentKind::Compound(_) if fragment.children.is_empty() => PropertyValue::Empty,
        FragmentKind::Compound(CompoundType::PhysicalProperties) => decode_physics(fragment),
        FragmentKind::Compound(CompoundType::CoordinateFrame) => {
            PropertyValue::Text(numeric_fields(fragment, CFRAME_FIELDS).join(" "))
        }
        FragmentKind::Compound(compound) => {
            PropertyValue::Text(numeric_fields(fragment, compound.fields()).join(", "))
        }
    }
}

/// Encode an edit string into a property fragment in place.
pub fn encode(fragment: &mut RawNode, input: &str) -> EditOutcome {
    match FragmentKind::classify(fragment) {
        FragmentKind::Attribute => {
            fragment.set_attribute(VALUE_ATTR, input);
            EditOutcome::Applied
        }
        FragmentKind::Cdata => {
            fragment.cdata = Some(input.to_string());
            EditOutcome::Applied
        }
        FragmentKind::Text => {
            set_text(fragment, input);
            EditOutcome::Applied
        }
        FragmentKind::Empty if fragment.tag == PROTECTED_STRING => {
            fragment.cdata = Some(input.to_string());
            EditOutcome::Applied
        }
        FragmentKind::Empty => {
            set_text(fragment, input);
            EditOutcome::Applied
        }
        FragmentKind::Unknown => EditOutcome::Unchanged,
        FragmentKind::Compound(CompoundType::PhysicalProperties) => encode_physics(fragment, input),
        FragmentKind::Compound(CompoundType::CoordinateFrame) => encode_positional(fragment, input),
        FragmentKind::Compound(compound) => encode_vector(fragment, compound.fields(), input),
    }
}

/// Scalar value of a fragment: `value` attribute, then CDATA, then text.
pub fn scalar_text(fragment: &RawNode) -> Option<&str> {
    fragment
        .attribute(VALUE_ATTR)
        .or(fragment.cdata.as_deref())
        .or(fragment.text.as_deref())
}

fn field_text(field: &RawNode) -> String {
    match scalar_text(field) {
        Some(value) => value.to_string(),
        None => field
            .children
            .iter()
            .map(field_text)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn numeric_fields(fragment: &RawNode, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .map(|name| {
            fragment
                .child_named(name)
                .and_then(scalar_text)
                .unwrap_or("0")
                .to_string()
        })
        .collect()
}

fn decode_physics(fragment: &RawNode) -> PropertyValue {
    let flag = fragment.child_named(PHYSICS_FLAG).and_then(scalar_text);
    let has_overrides = PHYSICS_OVERRIDES
        .iter()
        .any(|name| fragment.child_named(name).is_some());

    match flag {
        Some(flag) if !has_overrides || flag.eq_ignore_ascii_case("false") => {
            PropertyValue::Text(flag.to_string())
        }
        _ if has_overrides => PropertyValue::Text(numeric_fields(fragment, PHYSICS_OVERRIDES).join(" ")),
        _ => PropertyValue::Empty,
    }
}

fn encode_vector(fragment: &mut RawNode, fields: &[&str], input: &str) -> EditOutcome {
    let values: Option<Vec<f64>> = tokens(input).map(parse_number).collect();

    match values {
        Some(values) if values.len() == fields.len() => {
            for (name, value) in fields.iter().zip(values) {
                set_field(fragment, name, &format_number(value));
            }
            EditOutcome::Applied
        }
        _ => EditOutcome::Unchanged,
    }
}

/// Assign tokens to fields by position. Missing or non-numeric tokens leave
/// their field as it was.
fn encode_positional(fragment: &mut RawNode, input: &str) -> EditOutcome {
    let mut outcome = EditOutcome::Unchanged;

    for (name, token) in CFRAME_FIELDS.iter().zip(tokens(input)) {
        if let Some(value) = parse_number(token) {
            set_field(fragment, name, &format_number(value));
            outcome = EditOutcome::Applied;
        }
    }

    outcome
}

fn encode_physics(fragment: &mut RawNode, input: &str) -> EditOutcome {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        set_field(fragment, PHYSICS_FLAG, &trimmed.to_ascii_lowercase());
        return EditOutcome::Applied;
    }

    let values: Vec<f64> = tokens(input).filter_map(parse_number).collect();
    if values.len() < PHYSICS_OVERRIDES.len() {
        return EditOutcome::Unchanged;
    }

    set_field(fragment, PHYSICS_FLAG, "true");
    for (name, value) in PHYSICS_OVERRIDES.iter().zip(values) {
        set_field(fragment, name, &format_number(value));
    }
    EditOutcome::Applied
}

/// Write a named child field, creating it after the existing fields if absent.
fn set_field(fragment: &mut RawNode, name: &str, value: &str) {
    match fragment.child_named_mut(name) {
        Some(field) if field.attribute(VALUE_ATTR).is_some() => field.set_attribute(VALUE_ATTR, value),
        Some(field) if field.cdata.is_some() => field.cdata = Some(value.to_string()),
        Some(field) => set_text(field, value),
        None => fragment.children.push(RawNode::new(name).with_text(value)),
    }
}

/// Set element text. Blank text is stored as no text, which is how the parser
/// reads `<tag></tag>` and `<tag>  </tag>` back. Other text is kept verbatim.
fn set_text(node: &mut RawNode, value: &str) {
    node.text = (!value.trim().is_empty()).then(|| value.to_string());
}

fn tokens(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn format_number(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vector3(x: &str, y: &str, z: &str) -> RawNode {
        RawNode::new("Vector3")
            .attr("name", "Size")
            .child(RawNode::new("X").with_text(x))
            .child(RawNode::new("Y").with_text(y))
            .child(RawNode::new("Z").with_text(z))
    }

    fn physics_flag(flag: &str) -> RawNode {
        RawNode::new("PhysicalProperties")
            .attr("name", "CustomPhysicalProperties")
            .child(RawNode::new("CustomPhysics").with_text(flag))
    }

    fn cframe() -> RawNode {
        let mut node = RawNode::new("CoordinateFrame").attr("name", "CFrame");
        for (name, value) in CFRAME_FIELDS.iter().zip(["0", "5", "0", "1", "0", "0", "0", "1", "0", "0", "0", "1"]) {
            node.children.push(RawNode::new(*name).with_text(value));
        }
        node
    }

    #[rstest]
    #[case(RawNode::new("token").attr("name", "Material").attr("value", "256"), FragmentKind::Attribute)]
    #[case(RawNode::new("ProtectedString").attr("name", "Source").with_cdata(""), FragmentKind::Cdata)]
    #[case(RawNode::new("bool").attr("name", "Anchored").with_text("true"), FragmentKind::Text)]
    #[case(RawNode::new("string").attr("name", "Tags"), FragmentKind::Empty)]
    #[case(RawNode::new("Content").attr("name", "Texture").child(RawNode::new("null")), FragmentKind::Unknown)]
    #[case(vector3("1", "2", "3"), FragmentKind::Compound(CompoundType::Vector3))]
    fn test_classify(#[case] fragment: RawNode, #[case] expected: FragmentKind) {
        assert_eq!(FragmentKind::classify(&fragment), expected);
    }

    #[test]
    fn test_scalar_priority_attribute_cdata_text() {
        let node = RawNode::new("string").attr("value", "attr").with_cdata("cdata").with_text("text");
        assert_eq!(decode(&node), PropertyValue::Text("attr".into()));

        let node = RawNode::new("string").with_cdata("cdata").with_text("text");
        assert_eq!(decode(&node), PropertyValue::Text("cdata".into()));
    }

    #[test]
    fn test_scalar_encode_keeps_representation() {
        let mut attr = RawNode::new("token").attr("name", "Shape").attr("value", "1");
        assert_eq!(encode(&mut attr, "2"), EditOutcome::Applied);
        assert_eq!(attr.attribute("value"), Some("2"));
        assert_eq!(attr.text, None);

        let mut text = RawNode::new("float").attr("name", "Transparency").with_text("0");
        encode(&mut text, "0.5");
        assert_eq!(text.text.as_deref(), Some("0.5"));
        assert_eq!(text.attribute("value"), None);

        let mut cdata = RawNode::new("string").attr("name", "Name").with_cdata("old");
        encode(&mut cdata, "new");
        assert_eq!(cdata.cdata.as_deref(), Some("new"));
        assert_eq!(cdata.text, None);
    }

    #[test]
    fn test_text_encode_keeps_padding_drops_blank() {
        let mut node = RawNode::new("string").attr("name", "Text").with_text("old");
        encode(&mut node, " Score: ");
        assert_eq!(decode(&node), PropertyValue::Text(" Score: ".into()));

        encode(&mut node, "   ");
        assert_eq!(node.text, None);
        assert_eq!(decode(&node), PropertyValue::Empty);
    }

    #[test]
    fn test_empty_fragment_encode_default() {
        let mut source = RawNode::new("ProtectedString").attr("name", "Source");
        encode(&mut source, "print(1)");
        assert_eq!(source.cdata.as_deref(), Some("print(1)"));

        let mut tags = RawNode::new("string").attr("name", "Tags");
        encode(&mut tags, "a");
        assert_eq!(tags.text.as_deref(), Some("a"));
    }

    #[test]
    fn test_vector3_round_trip() {
        let mut node = vector3("4", "1.2", "2");
        assert_eq!(decode(&node), PropertyValue::Text("4, 1.2, 2".into()));

        assert_eq!(encode(&mut node, "1, 2, 3"), EditOutcome::Applied);
        assert_eq!(decode(&node), PropertyValue::Text("1, 2, 3".into()));
    }

    #[rstest]
    #[case("1, 2")]
    #[case("1, 2, 3, 4")]
    #[case("1, two, 3")]
    #[case("")]
    fn test_vector3_rejects_wrong_arity(#[case] input: &str) {
        let mut node = vector3("4", "1.2", "2");
        let before = node.clone();

        assert_eq!(encode(&mut node, input), EditOutcome::Unchanged);
        assert_eq!(node, before);
    }

    #[test]
    fn test_vector3_missing_field_decodes_zero_and_is_created() {
        let mut node = RawNode::new("Vector3")
            .child(RawNode::new("X").with_text("1"))
            .child(RawNode::new("Y").with_text("2"));
        assert_eq!(decode(&node), PropertyValue::Text("1, 2, 0".into()));

        encode(&mut node, "7 8 9");
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[2].tag, "Z");
        assert_eq!(decode(&node), PropertyValue::Text("7, 8, 9".into()));
    }

    #[test]
    fn test_color3_uses_vector_rule() {
        let mut node = RawNode::new("Color3")
            .child(RawNode::new("R").with_text("1"))
            .child(RawNode::new("G").with_text("1"))
            .child(RawNode::new("B").with_text("1"));
        assert_eq!(encode(&mut node, "0.5,0,0.25"), EditOutcome::Applied);
        assert_eq!(decode(&node), PropertyValue::Text("0.5, 0, 0.25".into()));
    }

    #[test]
    fn test_cframe_decodes_space_separated() {
        assert_eq!(
            decode(&cframe()),
            PropertyValue::Text("0 5 0 1 0 0 0 1 0 0 0 1".into())
        );
    }

    #[test]
    fn test_cframe_partial_positional_encode() {
        let mut node = cframe();
        assert_eq!(encode(&mut node, "10, 20"), EditOutcome::Applied);
        assert_eq!(
            decode(&node),
            PropertyValue::Text("10 20 0 1 0 0 0 1 0 0 0 1".into())
        );
    }

    #[test]
    fn test_cframe_skips_non_numeric_tokens() {
        let mut node = cframe();
        encode(&mut node, "x 7 y");
        assert_eq!(
            decode(&node),
            PropertyValue::Text("0 7 0 1 0 0 0 1 0 0 0 1".into())
        );

        assert_eq!(encode(&mut node, "nope"), EditOutcome::Unchanged);
    }

    #[test]
    fn test_physics_mode_switch() {
        let mut node = physics_flag("false");
        assert_eq!(decode(&node), PropertyValue::Text("false".into()));

        assert_eq!(encode(&mut node, "0.5 0.3 0.2 1 1"), EditOutcome::Applied);
        assert_eq!(node.child_named("CustomPhysics").unwrap().text.as_deref(), Some("true"));
        assert_eq!(node.children.len(), 6);
        assert_eq!(decode(&node), PropertyValue::Text("0.5 0.3 0.2 1 1".into()));

        assert_eq!(encode(&mut node, "FALSE"), EditOutcome::Applied);
        assert_eq!(decode(&node), PropertyValue::Text("false".into()));
    }

    #[test]
    fn test_physics_too_few_numbers_is_noop() {
        let mut node = physics_flag("false");
        let before = node.clone();

        assert_eq!(encode(&mut node, "0.5 0.3 0.2 1"), EditOutcome::Unchanged);
        assert_eq!(node, before);
    }

    #[test]
    fn test_physics_flag_only_true() {
        let node = physics_flag("true");
        assert_eq!(decode(&node), PropertyValue::Text("true".into()));
    }

    #[test]
    fn test_unknown_compound_is_read_only() {
        let mut node = RawNode::new("Content")
            .attr("name", "Texture")
            .child(RawNode::new("url").with_text("rbxassetid://1"));
        let before = node.clone();

        assert_eq!(
            decode(&node),
            PropertyValue::Fields(vec![("url".into(), "rbxassetid://1".into())])
        );
        assert_eq!(encode(&mut node, "rbxassetid://2"), EditOutcome::Unchanged);
        assert_eq!(node, before);
    }

    #[test]
    fn test_empty_compound_decodes_empty() {
        assert_eq!(decode(&RawNode::new("Vector3")), PropertyValue::Empty);
        assert_eq!(decode(&RawNode::new("string")), PropertyValue::Empty);
    }

    #[test]
    fn test_rejects_non_finite_numbers() {
        let mut node = vector3("1", "2", "3");
        assert_eq!(encode(&mut node, "inf 1 2"), EditOutcome::Unchanged);
        assert_eq!(encode(&mut node, "NaN 1 2"), EditOutcome::Unchanged);
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyValue::Empty.to_string(), "(empty)");
        assert_eq!(
            PropertyValue::Fields(vec![("a".into(), "1".into()), ("b".into(), "2".into())]).to_string(),
            "a: 1\nb: 2"
        );
    }
}
