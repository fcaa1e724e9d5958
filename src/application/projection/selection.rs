//! Field Selection - 字段选择树
//!
//! 从不可信的 JSON 解析，解析本身永不失败:
//! - `true`、非零数字、非空字符串 → 叶子
//! - `false`、`null`、`0`、`""`、数组 → 丢弃
//! - 对象 → 嵌套选择
//! - 超过最大深度的层级被丢弃

use std::collections::BTreeMap;

use serde_json::Value;

/// 最大嵌套深度
pub const MAX_DEPTH: usize = 8;

/// 单个字段的选择器
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    Leaf,
    Nested(Selection),
}

/// 字段名 → 选择器
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    fields: BTreeMap<String, FieldSelector>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 解析，非对象输入得到空选择
    pub fn from_json(value: &Value) -> Self {
        parse_level(value, 1)
    }

    /// 选中叶子字段
    pub fn leaf(mut self, key: impl Into<String>) -> Self {
        self.fields.insert(key.into(), FieldSelector::Leaf);
        self
    }

    /// 选中嵌套字段
    pub fn nested(mut self, key: impl Into<String>, selection: Selection) -> Self {
        self.fields
            .insert(key.into(), FieldSelector::Nested(selection));
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldSelector> {
        self.fields.get(key)
    }

    /// 字段是否被选中（叶子或嵌套均算）
    pub fn includes(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

fn parse_level(value: &Value, depth: usize) -> Selection {
    let mut selection = Selection::new();
    let Value::Object(map) = value else {
        return selection;
    };

    for (key, raw) in map {
        if let Some(selector) = parse_selector(raw, depth) {
            selection.fields.insert(key.clone(), selector);
        }
    }
    selection
}

fn parse_selector(raw: &Value, depth: usize) -> Option<FieldSelector> {
    match raw {
        Value::Bool(true) => Some(FieldSelector::Leaf),
        Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(FieldSelector::Leaf),
        Value::String(s) if !s.is_empty() => Some(FieldSelector::Leaf),
        Value::Object(_) if depth < MAX_DEPTH => {
            Some(FieldSelector::Nested(parse_level(raw, depth + 1)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_values_become_leaves() {
        let selection = Selection::from_json(&json!({
            "a": true,
            "b": 1,
            "c": -2.5,
            "d": "yes",
        }));
        assert_eq!(selection.len(), 4);
        for key in ["a", "b", "c", "d"] {
            assert_eq!(selection.get(key), Some(&FieldSelector::Leaf));
        }
    }

    #[test]
    fn test_falsy_values_and_arrays_are_dropped() {
        let selection = Selection::from_json(&json!({
            "a": false,
            "b": null,
            "c": 0,
            "d": "",
            "e": ["id"],
            "f": 0.0,
        }));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_objects_become_nested() {
        let selection = Selection::from_json(&json!({
            "id": true,
            "author": { "name": true, "slug": false },
        }));
        let expected = Selection::new()
            .leaf("id")
            .nested("author", Selection::new().leaf("name"));
        assert_eq!(selection, expected);
    }

    #[test]
    fn test_non_object_input_is_empty() {
        assert!(Selection::from_json(&json!(["id"])).is_empty());
        assert!(Selection::from_json(&json!("id")).is_empty());
        assert!(Selection::from_json(&Value::Null).is_empty());
    }

    #[test]
    fn test_depth_is_capped() {
        let mut value = json!({ "leaf": true });
        for _ in 0..20 {
            value = json!({ "next": value });
        }

        let mut depth = 1;
        let mut current = Selection::from_json(&value);
        while let Some(FieldSelector::Nested(inner)) = current.get("next") {
            current = inner.clone();
            depth += 1;
        }
        assert_eq!(depth, MAX_DEPTH);
        // 最深一层的对象被丢弃
        assert!(current.is_empty());
    }
}
