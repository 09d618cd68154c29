//! Default-value sources.
//!
//! [`ToolboxDefaults`] and [`ToolDefaults`] are the last layers of back-fill:
//! they supply generated text (purpose, abstract, credits, usage limits,
//! titles, dates, format constants) for every node the manifest left empty.
//! Values are derived from the manifest when it has them, so a toolbox
//! `description` becomes `idPurp`, a tool `label` the tool display name, and
//! so on.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::dates::{DateFormat, FileDates};
use crate::error::Result;
use crate::keywords::KeywordPolicy;
use crate::manifest::{ParameterDefinition, ParameterFilter, ScriptExample, ToolManifest, ToolboxManifest};
use crate::options::GeneratorOptions;
use crate::schema::{
    ARCGIS_FORMAT, ARCGIS_PROFILE, MAX_SCALE, MIN_SCALE, SYNC_ONCE, TOOLBOX_FORMAT_NAME,
    TOOL_FORMAT_NAME,
};
use crate::source::{display_value, text_field, FieldSource};
use crate::text::{normalize, spans, to_markup, LINE_BREAK};

/// Category of tools that declare none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Value-list entries listed in parameter help before truncating.
pub const MAX_LISTED_VALUES: usize = 10;

const CONTACT_NOTE: &str = "Contact POC below for more information.";

/// Note attached to the generated code sample.
const DEFAULT_EXAMPLE_NOTE: [&str; 4] = [
    "<em>    <b>Note</b> : Calling custom toolboxes is only available</em>",
    "<em>    within external python interpreters and script files!</em>",
    "<em>    Code sample will not work in ArcGIS python windows.</em>",
    "<em>    Code sample will not work in ArcGIS python notebooks.</em>",
];

/// Non-blank strings of a list-valued field, `None` when there are none.
fn string_list<S: FieldSource + ?Sized>(source: &S, name: &str) -> Option<Vec<String>> {
    let Some(Value::Array(items)) = source.get_field(name) else {
        return None;
    };
    let list: Vec<String> = items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (!list.is_empty()).then_some(list)
}

/// Toolbox-level defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolboxDefaults {
    name: String,
    alias: String,
    toolbox_path: PathBuf,
    id_purp: String,
    id_abs: String,
    id_credit: String,
    use_limit: String,
    crea_date: String,
    crea_time: String,
    mod_date: String,
    mod_time: String,
    md_date_st: String,
    help_path: Option<String>,
    keywords: Vec<String>,
}

impl ToolboxDefaults {
    pub fn new(
        manifest: &ToolboxManifest,
        options: &GeneratorOptions,
        dates: &FileDates,
        policy: &dyn KeywordPolicy,
    ) -> Result<Self> {
        let date = DateFormat::parse(&options.date_format)?;
        let time = DateFormat::parse(&options.time_format)?;

        let name = manifest.toolbox_name();
        let alias = text_field(manifest, "alias").unwrap_or_else(|| name.clone());
        let id_purp = text_field(manifest, "description")
            .map(|d| normalize(&d))
            .unwrap_or_else(|| spans([format!("{name} is an ArcGIS python toolbox."), CONTACT_NOTE.to_string()]));
        let id_abs = format!(
            "{id_purp}{}{}",
            LINE_BREAK.repeat(2),
            included_tools(&manifest.tools)
        );

        let credits = options.contact.credits();
        let id_credit = credits.join(LINE_BREAK);
        let use_limit = spans([
            "<b>For questions regarding usage limitations, contact:</b>".to_string(),
            format!("   {}", credits[0]),
            format!("   {}", credits[1]),
            format!("   {}", credits[2]),
            LINE_BREAK.to_string(),
            format!(
                "<b>Disclaimer: **Metadata auto generated with module {}**</b>",
                options.generator_name
            ),
            "<b>    -For detailed release notes, contact the POC above!</b>".to_string(),
        ]);

        let keywords = string_list(manifest, "searchKeys")
            .unwrap_or_else(|| policy.keywords(&[alias.as_str(), name.as_str()]));

        let toolbox_path = manifest.toolbox_path();
        let toolbox_path = std::path::absolute(&toolbox_path).unwrap_or(toolbox_path);

        debug!(toolbox = %name, alias = %alias, keywords = keywords.len(), "toolbox defaults ready");
        Ok(Self {
            name,
            alias,
            toolbox_path,
            id_purp,
            id_abs,
            id_credit,
            use_limit,
            crea_date: date.format(&dates.created),
            crea_time: time.format(&dates.created),
            mod_date: date.format(&dates.modified),
            mod_time: time.format(&dates.modified),
            md_date_st: date.format(&dates.now),
            help_path: options.help_path.clone().filter(|p| !p.is_empty()),
            keywords,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Absolute path of the `.pyt` file, as written into code samples.
    pub fn toolbox_path(&self) -> &Path {
        &self.toolbox_path
    }

    /// Keywords of the toolbox itself, before tool keywords are merged in.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "alias" => &self.alias,
            "idPurp" => &self.id_purp,
            "idAbs" => &self.id_abs,
            "resTitle" => &self.name,
            "idCredit" => &self.id_credit,
            "useLimit" => &self.use_limit,
            "CreaDate" => &self.crea_date,
            "CreaTime" => &self.crea_time,
            "ModDate" => &self.mod_date,
            "ModTime" => &self.mod_time,
            "mdDateSt" => &self.md_date_st,
            "arcToolboxHelpPath" => return self.help_path.as_deref(),
            "formatName" => return Some(TOOLBOX_FORMAT_NAME),
            "ArcGISFormat" => return Some(ARCGIS_FORMAT),
            "SyncOnce" => return Some(SYNC_ONCE),
            "minScale" => return Some(MIN_SCALE),
            "maxScale" => return Some(MAX_SCALE),
            "ArcGISProfile" => return Some(ARCGIS_PROFILE),
            _ => return None,
        };
        Some(value.as_str())
    }
}

impl FieldSource for ToolboxDefaults {
    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.field(name).map(|v| Value::String(v.to_string()))
    }
}

/// "Included Tools" listing appended to the toolbox abstract.
fn included_tools(tools: &[ToolManifest]) -> String {
    let mut lines = vec!["<b>Included Tools:</b>".to_string()];
    for tool in tools {
        let label = text_field(tool, "label").unwrap_or_else(|| tool.name.clone());
        let category = text_field(tool, "category").unwrap_or_else(|| "None".to_string());
        lines.push(format!(
            "{LINE_BREAK}<b>    - {label}</b> (Category: {category})"
        ));
        let description = text_field(tool, "description")
            .or_else(|| text_field(tool, "usage"))
            .unwrap_or_default();
        for line in description.lines() {
            lines.push(format!("<em>        {}</em>", line.trim()));
        }
    }
    lines.join(LINE_BREAK)
}

/// Tool-level defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefaults {
    name: String,
    label: String,
    category: String,
    summary: String,
    usage: String,
    res_title: String,
    keywords: Vec<String>,
    script_examples: Vec<ScriptExample>,
}

impl ToolDefaults {
    pub fn new(tool: &ToolManifest, toolbox: &ToolboxDefaults, policy: &dyn KeywordPolicy) -> Self {
        let name = tool.name.clone();
        let label = text_field(tool, "label").unwrap_or_else(|| name.clone());
        let category = text_field(tool, "category").unwrap_or_else(|| UNCATEGORIZED.to_string());
        let summary = text_field(tool, "description")
            .map(|d| normalize(&d))
            .unwrap_or_else(|| spans([format!("{name} is an ArcGIS python toolbox tool."), CONTACT_NOTE.to_string()]));
        let usage = text_field(tool, "usage")
            .map(|u| normalize(&u))
            .unwrap_or_else(|| summary.clone());
        let res_title = format!("{}.({})", toolbox.alias(), category);

        let keywords = string_list(tool, "searchKeys").unwrap_or_else(|| {
            let toolbox_keywords = toolbox.keywords().join(" ");
            policy.keywords(&[
                label.as_str(),
                name.as_str(),
                toolbox_keywords.as_str(),
                category.as_str(),
            ])
        });

        let mut defaults = Self {
            name,
            label,
            category,
            summary,
            usage,
            res_title,
            keywords,
            script_examples: Vec::new(),
        };
        defaults.script_examples = defaults.validate_examples(tool, toolbox);
        defaults
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Declared script examples, or the generated one when they are missing
    /// or malformed.
    pub fn script_examples(&self) -> &[ScriptExample] {
        &self.script_examples
    }

    fn validate_examples(&self, tool: &ToolManifest, toolbox: &ToolboxDefaults) -> Vec<ScriptExample> {
        match tool.get_field("scriptExamples") {
            None => vec![self.default_example(tool, toolbox)],
            Some(value) => match self.declared_examples(value) {
                Some(examples) => examples,
                None => {
                    warn!(tool = %self.name, "malformed scriptExamples, using the generated sample");
                    vec![self.default_example(tool, toolbox)]
                }
            },
        }
    }

    /// Declared examples with blank titles and descriptions filled in; `None`
    /// when the value has the wrong shape or any example has no code.
    fn declared_examples(&self, value: Value) -> Option<Vec<ScriptExample>> {
        let raw: IndexMap<String, RawExample> = serde_json::from_value(value).ok()?;
        if raw.is_empty() {
            return None;
        }
        raw.into_iter()
            .map(|(title, example)| {
                let code = example.code.into_text();
                if code.is_empty() {
                    return None;
                }
                let title = if title.trim().is_empty() {
                    format!("{}: Code Sample", self.label)
                } else {
                    title
                };
                let para = if example.para.trim().is_empty() {
                    format!("Sample Description: {}", self.summary)
                } else {
                    example.para
                };
                Some(ScriptExample { title, para, code })
            })
            .collect()
    }

    fn default_example(&self, tool: &ToolManifest, toolbox: &ToolboxDefaults) -> ScriptExample {
        ScriptExample {
            title: format!("{}: Code Sample (1)", self.label),
            para: DEFAULT_EXAMPLE_NOTE.join("\n"),
            code: default_code(toolbox.toolbox_path(), toolbox.alias(), &self.name, &tool.parameters),
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "label" => &self.label,
            "category" => &self.category,
            "summary" => &self.summary,
            "usage" => &self.usage,
            "resTitle" => &self.res_title,
            "formatName" => return Some(TOOL_FORMAT_NAME),
            _ => return None,
        };
        Some(value.as_str())
    }
}

impl FieldSource for ToolDefaults {
    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        self.field(name).map(|v| Value::String(v.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct RawExample {
    #[serde(default)]
    para: String,
    code: CodeText,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CodeText {
    Text(String),
    Lines(Vec<String>),
}

impl CodeText {
    fn into_text(self) -> String {
        match self {
            CodeText::Text(text) => text,
            CodeText::Lines(lines) => lines.join("\n"),
        }
    }
}

/// Python snippet importing the toolbox and calling one tool with every
/// parameter listed.
pub fn default_code(
    toolbox_path: &Path,
    alias: &str,
    tool_name: &str,
    parameters: &[ParameterDefinition],
) -> String {
    let lead = " ".repeat(11);
    let width = parameters
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);
    let arguments = parameters
        .iter()
        .map(|p| {
            let pad = " ".repeat(width + 4 - p.name.chars().count());
            format!("{}{pad}#{}- Type({})", p.name, p.label(), p.datatype)
        })
        .collect::<Vec<_>>()
        .join(&format!(",\n{lead}"));

    format!(
        "# import the toolbox as a module\n\
         import arcpy\n\
         arcpy.ImportToolbox(r'{path}',\n\
         {indent}r'{alias}')\n\
         \n\
         # call the tool and return the output\n\
         result = arcpy.{tool_name}_{alias}(\n\
         {lead}{arguments}\n\
         {lead})",
        path = toolbox_path.display(),
        indent = " ".repeat(20),
    )
}

/// `dialogReference` markup of a parameter.
///
/// The declared text is normalized on its own before it is wrapped, so an
/// indented block keeps its spans inside the `<em>` element.
pub fn dialog_reference(parameter: &ParameterDefinition) -> String {
    let text = parameter
        .dialog_reference
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(parameter.label());
    to_markup(&format!("<em>{}</em>{LINE_BREAK}", normalize(text)))
}

/// `pythonReference` markup of a parameter: declared text, or a generated
/// description with dependencies, default value and allowed values.
pub fn python_reference(parameter: &ParameterDefinition) -> String {
    if let Some(declared) = parameter.python_reference.as_deref().filter(|r| !r.is_empty()) {
        return to_markup(declared);
    }

    let dependencies = if parameter.parameter_dependencies.is_empty() {
        "N/A".to_string()
    } else {
        parameter.parameter_dependencies.join(", ")
    };
    let default = parameter.default_text().unwrap_or_else(|| "N/A".to_string());

    let mut lines = vec![
        format!("<u>Python variable name:</u> (<em>{}</em>)", parameter.name),
        format!(
            "<u>Description:</u> {} {} value representing the tool",
            parameter.parameter_type,
            parameter.datatype.to_lowercase()
        ),
        format!(
            "{}\"<em>{}</em>\" {} parameter.",
            "&#160; ".repeat(10),
            parameter.label(),
            parameter.direction
        ),
        format!("<u>Dependencies:</u> {dependencies}"),
        format!("<u>Default Value:</u> {default}"),
    ];
    if let Some(filter) = &parameter.filter {
        lines.extend(allowed_values(filter));
    }
    spans(lines)
}

fn allowed_values(filter: &ParameterFilter) -> Vec<String> {
    let lead = "&#160; ".repeat(8);
    match filter.kind.as_str() {
        "ValueList" if !filter.list.is_empty() => {
            let mut lines = vec!["<u>Allowed Values:</u>".to_string()];
            lines.extend(
                filter
                    .list
                    .iter()
                    .take(MAX_LISTED_VALUES)
                    .map(|v| format!("<span>{lead}-</span>{}", display_value(v))),
            );
            if filter.list.len() > MAX_LISTED_VALUES {
                lines.push(format!("<span>{lead}</span><b>*Only first 10 values displayed...*</b>"));
                lines.push(format!("<span>{lead}</span>  <b>*See tool parameter for full list...*</b>"));
            }
            lines
        }
        "Range" if filter.list.len() == 2 => vec![format!(
            "<u>Allowed Range:</u> Min({}),  Max ({})",
            display_value(&filter.list[0]),
            display_value(&filter.list[1])
        )],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::DefaultKeywordPolicy;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn dates() -> FileDates {
        FileDates {
            created: Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap(),
            modified: Utc.with_ymd_and_hms(2024, 6, 7, 8, 9, 10).unwrap(),
            accessed: Utc.with_ymd_and_hms(2024, 6, 7, 8, 9, 10).unwrap(),
            now: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn manifest() -> ToolboxManifest {
        ToolboxManifest::new("Hydrology")
            .with_toolbox_path("/data/Hydrology.pyt")
            .with_field("alias", "hydro")
            .with_tool(
                ToolManifest::new("FillSinks")
                    .with_field("label", "Fill Sinks")
                    .with_field("category", "Surface")
                    .with_field("description", "Fills sinks.\nKeeps flow.")
                    .with_parameter(ParameterDefinition::new("in_dem").with_display_name("Input DEM"))
                    .with_parameter(ParameterDefinition::new("z").with_datatype("Double")),
            )
            .with_tool(ToolManifest::new("Flow"))
    }

    fn toolbox_defaults(manifest: &ToolboxManifest) -> ToolboxDefaults {
        let options = GeneratorOptions::default();
        ToolboxDefaults::new(manifest, &options, &dates(), &DefaultKeywordPolicy).unwrap()
    }

    #[test]
    fn test_toolbox_fields() {
        let defaults = toolbox_defaults(&manifest());
        assert_eq!(defaults.get_field("alias"), Some(json!("hydro")));
        assert_eq!(defaults.get_field("resTitle"), Some(json!("Hydrology")));
        assert_eq!(defaults.get_field("CreaDate"), Some(json!("20230102")));
        assert_eq!(defaults.get_field("CreaTime"), Some(json!("03040500")));
        assert_eq!(defaults.get_field("ModDate"), Some(json!("20240607")));
        assert_eq!(defaults.get_field("mdDateSt"), Some(json!("20250101")));
        assert_eq!(defaults.get_field("formatName"), Some(json!("ArcToolbox Toolbox")));
        assert!(!defaults.has_field("arcToolboxHelpPath"));
        assert!(!defaults.has_field("label"));
        assert_eq!(defaults.keywords(), ["HYDRO", "Hydrology"]);
    }

    #[test]
    fn test_toolbox_abstract_lists_tools() {
        let defaults = toolbox_defaults(&manifest());
        let id_purp = "<span>Hydrology is an ArcGIS python toolbox.</span><br></br>\
                       <span>Contact POC below for more information.</span>";
        assert_eq!(defaults.get_field("idPurp"), Some(json!(id_purp)));

        let expected = format!(
            "{id_purp}<br></br><br></br><b>Included Tools:</b>\
             <br></br><br></br><b>    - Fill Sinks</b> (Category: Surface)\
             <br></br><em>        Fills sinks.</em>\
             <br></br><em>        Keeps flow.</em>\
             <br></br><br></br><b>    - Flow</b> (Category: None)"
        );
        assert_eq!(defaults.get_field("idAbs"), Some(json!(expected)));
    }

    #[test]
    fn test_toolbox_description_becomes_purpose() {
        let manifest = manifest().with_field("description", "Watershed tools");
        let defaults = toolbox_defaults(&manifest);
        assert_eq!(defaults.get_field("idPurp"), Some(json!("Watershed tools")));
    }

    #[test]
    fn test_declared_search_keys_used() {
        let manifest = manifest().with_field("searchKeys", json!(["Rivers", " ", "water"]));
        let defaults = toolbox_defaults(&manifest);
        assert_eq!(defaults.keywords(), ["Rivers", "water"]);
    }

    #[test]
    fn test_tool_fields() {
        let manifest = manifest();
        let toolbox = toolbox_defaults(&manifest);
        let tool = ToolDefaults::new(&manifest.tools[0], &toolbox, &DefaultKeywordPolicy);
        assert_eq!(tool.label(), "Fill Sinks");
        assert_eq!(tool.get_field("resTitle"), Some(json!("hydro.(Surface)")));
        assert_eq!(tool.get_field("summary"), Some(json!("Fills sinks.\nKeeps flow.")));
        assert_eq!(tool.get_field("usage"), tool.get_field("summary"));
        assert_eq!(tool.get_field("formatName"), Some(json!("ArcToolbox Tool")));
        assert_eq!(
            tool.keywords(),
            ["Fill", "FillSinks", "HYDRO", "Hydrology", "Sinks", "Surface"]
        );

        let bare = ToolDefaults::new(&manifest.tools[1], &toolbox, &DefaultKeywordPolicy);
        assert_eq!(bare.label(), "Flow");
        assert_eq!(bare.category(), "Uncategorized");
        assert_eq!(
            bare.get_field("summary"),
            Some(json!(
                "<span>Flow is an ArcGIS python toolbox tool.</span><br></br>\
                 <span>Contact POC below for more information.</span>"
            ))
        );
    }

    #[test]
    fn test_default_script_example() {
        let manifest = manifest();
        let toolbox = toolbox_defaults(&manifest);
        let tool = ToolDefaults::new(&manifest.tools[0], &toolbox, &DefaultKeywordPolicy);
        let examples = tool.script_examples();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].title, "Fill Sinks: Code Sample (1)");
        assert!(examples[0].para.starts_with("<em>    <b>Note</b>"));
        assert_eq!(
            examples[0].code,
            "# import the toolbox as a module\n\
             import arcpy\n\
             arcpy.ImportToolbox(r'/data/Hydrology.pyt',\n                    r'hydro')\n\
             \n\
             # call the tool and return the output\n\
             result = arcpy.FillSinks_hydro(\n           \
             in_dem    #Input DEM- Type(String),\n           \
             z         #z- Type(Double)\n           )"
        );
    }

    #[test]
    fn test_declared_script_examples() {
        let manifest = manifest();
        let toolbox = toolbox_defaults(&manifest);
        let tool = manifest.tools[0].clone().with_field(
            "scriptExamples",
            json!({
                "Basic": {"para": "Run it", "code": ["import arcpy", "run()"]},
                " ": {"code": "other()"}
            }),
        );
        let defaults = ToolDefaults::new(&tool, &toolbox, &DefaultKeywordPolicy);
        let examples = defaults.script_examples();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].code, "import arcpy\nrun()");
        assert_eq!(examples[1].title, "Fill Sinks: Code Sample");
        assert_eq!(examples[1].para, "Sample Description: Fills sinks.\nKeeps flow.");
    }

    #[test]
    fn test_malformed_script_examples_fall_back() {
        let manifest = manifest();
        let toolbox = toolbox_defaults(&manifest);
        for bad in [json!("code"), json!({}), json!({"T": {"para": "p", "code": []}})] {
            let tool = manifest.tools[0].clone().with_field("scriptExamples", bad);
            let defaults = ToolDefaults::new(&tool, &toolbox, &DefaultKeywordPolicy);
            assert_eq!(defaults.script_examples()[0].title, "Fill Sinks: Code Sample (1)");
        }
    }

    #[test]
    fn test_dialog_reference() {
        let p = ParameterDefinition::new("in_dem").with_display_name("Input DEM");
        assert_eq!(dialog_reference(&p), "<span><em>Input DEM</em><br></br></span>");
    }

    #[test]
    fn test_dialog_reference_multiline_stays_inside_emphasis() {
        let mut p = ParameterDefinition::new("in_dem");
        p.dialog_reference = Some("Line one\n    Line two".to_string());
        assert_eq!(
            dialog_reference(&p),
            "<span><em><span>Line one</span><br></br><span>Line two</span></em><br></br></span>"
        );
    }

    #[test]
    fn test_python_reference_value_list_truncated() {
        let values = (1..=12).map(|i| json!(format!("v{i}"))).collect();
        let p = ParameterDefinition::new("mode").with_filter("ValueList", values);
        let markup = python_reference(&p);
        assert!(markup.starts_with("<span><u>Python variable name:</u> (<em>mode</em>)</span>"));
        assert!(markup.contains("<u>Dependencies:</u> N/A"));
        assert!(markup.contains("<u>Default Value:</u> N/A"));
        assert!(markup.contains("-</span>v10</span>"));
        assert!(!markup.contains("v11"));
        assert!(markup.contains("*Only first 10 values displayed...*"));
    }

    #[test]
    fn test_python_reference_range_and_default() {
        let p = ParameterDefinition::new("z")
            .with_filter("Range", vec![json!(0), json!(100)])
            .with_value(json!(5));
        let markup = python_reference(&p);
        assert!(markup.contains("<u>Default Value:</u> 5"));
        assert!(markup.ends_with("<span><u>Allowed Range:</u> Min(0),  Max (100)</span>"));
    }

    #[test]
    fn test_python_reference_declared() {
        let mut p = ParameterDefinition::new("z");
        p.python_reference = Some("Custom\n    text".into());
        assert_eq!(python_reference(&p), "<span>Custom</span><br></br><span>text</span>");
    }
}
