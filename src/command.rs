//! # Command Synthesizer
//!
//! Turns a fully merged [`Target`] into the argument vector for the converter
//! and works out the output file it will produce.
//!
//! The argument order is fixed, because the converter treats some flags
//! order-sensitively:
//!
//! 1. converter executable
//! 2. options, in merged order, except `output`/`o`
//! 3. `-F` filters (wrapped by the dual filters in dual mode)
//! 4. `-V` variables
//! 5. `-M` metadata
//! 6. `-o <outfile>`
//! 7. preamble files, then input files
//!
//! ## Output file
//!
//! An explicit `output`/`o` option always wins. Otherwise the file name is
//! `<basename>.<extension>`, where the extension comes from the output format
//! (`t`/`to`) and whether the document is standalone (`s`/`standalone`):
//!
//! | format   | standalone | regular |
//! |----------|------------|---------|
//! | `latex`  | `pdf`      | `tex`   |
//! | `beamer` | `pdf`      | `tex`   |
//! | `plain`  | `txt`      | `txt`   |
//! | other    | format     | format  |
//!
//! With no format option at all the extension is `pdf`. Without a basename the
//! file is `output.<extension>`.

use std::path::Path;

use log::debug;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::options::{is_short, OptionValue};
use crate::target::{ConverterCommand, OutputBasename, Target, VarMap};

/// Filter placed before all others in dual mode.
pub const DUAL_PRE_FILTER: &str = "dual_md";

/// Filter placed after all others in dual mode.
pub const DUAL_POST_FILTER: &str = "teaching_md";

/// Extension used when no output format is given.
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Stem used when no basename is configured.
pub const FALLBACK_STEM: &str = "output";

const STANDALONE_EXTENSIONS: &[(&str, &str)] =
    &[("latex", "pdf"), ("beamer", "pdf"), ("plain", "txt")];
const REGULAR_EXTENSIONS: &[(&str, &str)] =
    &[("latex", "tex"), ("beamer", "tex"), ("plain", "txt")];

/// Returns the file extension produced for an output format.
///
/// # Examples
///
/// ```
/// use panbuild::command::extension_for;
///
/// assert_eq!(extension_for("beamer", true), "pdf");
/// assert_eq!(extension_for("beamer", false), "tex");
/// assert_eq!(extension_for("html", true), "html");
/// ```
pub fn extension_for(format: &str, standalone: bool) -> &str {
    let table = if standalone {
        STANDALONE_EXTENSIONS
    } else {
        REGULAR_EXTENSIONS
    };
    table
        .iter()
        .find(|(name, _)| *name == format)
        .map(|(_, ext)| *ext)
        .unwrap_or(format)
}

/// Path of a dual-mode filter, inside `dir` when one is configured.
pub fn dual_filter_path(dir: Option<&str>, name: &str) -> String {
    match dir {
        Some(dir) => Path::new(dir)
            .join(format!("{}.py", name))
            .to_string_lossy()
            .into_owned(),
        None => name.to_string(),
    }
}

/// Synthesizes the converter command for one target.
///
/// Fails if the target has no input files, or if its output path or output
/// format is empty or given more than once.
pub fn synthesize(target: &Target, settings: &Settings) -> Result<ConverterCommand> {
    let subname = target.subname();

    if target.input_files().is_empty() {
        return Err(Error::invalid_value(
            subname,
            "input_files",
            "no input files have been specified",
        ));
    }

    let mut args = vec![settings.converter.clone()];
    let options = target.options();

    let standalone = options.contains_key("s") || options.contains_key("standalone");
    let mut extension = if options.contains_key("t") || options.contains_key("to") {
        None
    } else {
        Some(DEFAULT_EXTENSION.to_string())
    };
    let mut forced_output = None;

    for (key, value) in options {
        match key.as_str() {
            "output" | "o" => {
                forced_output = Some(single_value(subname, key, value, "output file")?);
                continue;
            }
            "to" | "t" => {
                let format = single_value(subname, key, value, "output format")?;
                extension = Some(extension_for(&format, standalone).to_string());
            }
            _ => {}
        }
        push_option(&mut args, key, value);
    }

    let filters = if settings.dual {
        let dir = settings.dual_filters_dir.as_deref();
        let mut wrapped = vec![dual_filter_path(dir, DUAL_PRE_FILTER)];
        wrapped.extend(target.filters().iter().cloned());
        wrapped.push(dual_filter_path(dir, DUAL_POST_FILTER));
        wrapped
    } else {
        target.filters().to_vec()
    };
    for filter in filters {
        args.push("-F".to_string());
        args.push(filter);
    }

    push_pairs(&mut args, "-V", target.variables());
    push_pairs(&mut args, "-M", target.metadata());

    let outfile = match forced_output {
        Some(path) => path,
        None => output_path(target, extension.as_deref().unwrap_or(DEFAULT_EXTENSION)),
    };
    args.push("-o".to_string());
    args.push(outfile.clone());

    args.extend(target.preamble().iter().cloned());
    args.extend(target.input_files().iter().cloned());

    debug!("Command for {}: {}", subname, args.join(" "));
    Ok(ConverterCommand { args, outfile })
}

/// Synthesizes and attaches the command for one target.
pub fn build_command(target: &mut Target, settings: &Settings) -> Result<()> {
    let command = synthesize(target, settings)?;
    target.attach_command(command);
    Ok(())
}

/// The one non-empty value of an option that may not repeat.
fn single_value(subname: &str, key: &str, value: &OptionValue, what: &str) -> Result<String> {
    match value.values().as_slice() {
        [single] if !single.is_empty() => Ok(single.to_string()),
        [] | [_] => Err(Error::invalid_value(
            subname,
            key,
            format!("empty {}", what),
        )),
        many => Err(Error::invalid_value(
            subname,
            key,
            format!("{} values given for the {}, expected one", many.len(), what),
        )),
    }
}

pub(crate) fn push_option(args: &mut Vec<String>, key: &str, value: &OptionValue) {
    for item in value.values() {
        match (is_short(key), item.is_empty()) {
            (true, true) => args.push(format!("-{}", key)),
            (true, false) => {
                args.push(format!("-{}", key));
                args.push(item.to_string());
            }
            (false, true) => args.push(format!("--{}", key)),
            (false, false) => args.push(format!("--{}={}", key, item)),
        }
    }
}

fn push_pairs(args: &mut Vec<String>, flag: &str, pairs: &VarMap) {
    for (key, value) in pairs {
        args.push(flag.to_string());
        match value.as_deref() {
            Some(v) if !v.is_empty() => args.push(format!("{}={}", key, v)),
            _ => args.push(key.clone()),
        }
    }
}

fn output_path(target: &Target, extension: &str) -> String {
    let stem = match target.output_basename() {
        Some(OutputBasename::Single(base)) => base.clone(),
        Some(OutputBasename::PerTarget(bases)) => match bases.get(target.name()) {
            Some(base) => base.clone(),
            None => format!("{}_{}", FALLBACK_STEM, target.name()),
        },
        None => FALLBACK_STEM.to_string(),
    };
    format!("{}.{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionSet;
    use crate::target::TargetFields;
    use indexmap::IndexMap;
    use std::sync::Arc;

    fn scalar(v: &str) -> OptionValue {
        OptionValue::Scalar(v.to_string())
    }

    fn target_with(options: &[(&str, OptionValue)], basename: Option<&str>) -> Target {
        let mut set = OptionSet::new();
        for (k, v) in options {
            set.insert(k.to_string(), v.clone());
        }
        Target::new(
            "slides",
            None,
            TargetFields {
                options: set,
                input_files: vec!["a.md".into()],
                output_basename: basename.map(|b| OutputBasename::Single(b.into())),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_extension_table() {
        assert_eq!(extension_for("latex", true), "pdf");
        assert_eq!(extension_for("latex", false), "tex");
        assert_eq!(extension_for("plain", true), "txt");
        assert_eq!(extension_for("plain", false), "txt");
        assert_eq!(extension_for("docx", false), "docx");
    }

    #[test]
    fn test_standalone_beamer_is_pdf() {
        let target = target_with(&[("t", scalar("beamer")), ("s", OptionValue::Flag)], Some("slides"));
        let cmd = synthesize(&target, &Settings::default()).unwrap();
        assert_eq!(cmd.outfile, "slides.pdf");
        assert_eq!(
            cmd.args,
            vec!["pandoc", "-t", "beamer", "-s", "-o", "slides.pdf", "a.md"]
        );
    }

    #[test]
    fn test_regular_beamer_is_tex() {
        let target = target_with(&[("t", scalar("beamer"))], Some("slides"));
        let cmd = synthesize(&target, &Settings::default()).unwrap();
        assert_eq!(cmd.outfile, "slides.tex");
    }

    #[test]
    fn test_long_standalone_flag_counts() {
        let target = target_with(
            &[("to", scalar("latex")), ("standalone", OptionValue::Flag)],
            Some("notes"),
        );
        let cmd = synthesize(&target, &Settings::default()).unwrap();
        assert_eq!(cmd.outfile, "notes.pdf");
        assert_eq!(&cmd.args[1..3], ["--to=latex", "--standalone"]);
    }

    #[test]
    fn test_no_format_defaults_to_pdf() {
        let target = target_with(&[], Some("doc"));
        assert_eq!(
            synthesize(&target, &Settings::default()).unwrap().outfile,
            "doc.pdf"
        );
    }

    #[test]
    fn test_unknown_format_is_its_own_extension() {
        let target = target_with(&[("t", scalar("html5"))], Some("page"));
        assert_eq!(
            synthesize(&target, &Settings::default()).unwrap().outfile,
            "page.html5"
        );
    }

    #[test]
    fn test_forced_output_wins() {
        let target = target_with(
            &[("t", scalar("beamer")), ("output", scalar("custom.pdf"))],
            Some("slides"),
        );
        let cmd = synthesize(&target, &Settings::default()).unwrap();
        assert_eq!(cmd.outfile, "custom.pdf");
        assert_eq!(
            cmd.args,
            vec!["pandoc", "-t", "beamer", "-o", "custom.pdf", "a.md"]
        );
    }

    #[test]
    fn test_multiple_outputs_rejected() {
        let target = target_with(
            &[("output", OptionValue::Multi(vec!["a.pdf".into(), "b.pdf".into()]))],
            None,
        );
        let err = synthesize(&target, &Settings::default()).unwrap_err();
        match err {
            Error::InvalidValue { target, field, .. } => {
                assert_eq!(target, "slides");
                assert_eq!(field, "output");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_output_rejected() {
        let target = target_with(&[("o", OptionValue::Flag)], None);
        assert!(matches!(
            synthesize(&target, &Settings::default()),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_or_ambiguous_format_rejected() {
        let empty = target_with(&[("t", OptionValue::Flag)], None);
        assert!(synthesize(&empty, &Settings::default()).is_err());

        let many = target_with(
            &[("to", OptionValue::Multi(vec!["latex".into(), "html".into()]))],
            None,
        );
        let err = synthesize(&many, &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("2 values"));
    }

    #[test]
    fn test_no_input_files_rejected() {
        let target = Target::new("empty", None, TargetFields::default());
        let err = synthesize(&target, &Settings::default()).unwrap_err();
        assert_eq!(err.target(), Some("empty"));
        assert!(err.to_string().contains("input_files"));
    }

    #[test]
    fn test_multi_values_emit_one_flag_each() {
        let target = target_with(
            &[
                ("V", OptionValue::Multi(vec!["a=1".into(), String::new()])),
                ("include-in-header", OptionValue::Multi(vec!["h1.tex".into(), "h2.tex".into()])),
            ],
            Some("x"),
        );
        let cmd = synthesize(&target, &Settings::default()).unwrap();
        assert_eq!(
            &cmd.args[1..6],
            [
                "-V",
                "a=1",
                "-V",
                "--include-in-header=h1.tex",
                "--include-in-header=h2.tex"
            ]
        );
    }

    #[test]
    fn test_filters_variables_metadata_and_files_order() {
        let mut variables = VarMap::new();
        variables.insert("theme".into(), Some("metropolis".into()));
        variables.insert("draft".into(), None);
        let mut metadata = VarMap::new();
        metadata.insert("title".into(), Some("Talk".into()));

        let target = Target::new(
            "slides",
            None,
            TargetFields {
                filters: vec!["one.lua".into()],
                variables,
                metadata,
                preamble: vec!["pre.md".into()],
                input_files: vec!["a.md".into(), "b.md".into()],
                ..Default::default()
            },
        );
        let cmd = synthesize(&target, &Settings::default()).unwrap();
        assert_eq!(
            cmd.args,
            vec![
                "pandoc",
                "-F",
                "one.lua",
                "-V",
                "theme=metropolis",
                "-V",
                "draft",
                "-M",
                "title=Talk",
                "-o",
                "output.pdf",
                "pre.md",
                "a.md",
                "b.md"
            ]
        );
    }

    #[test]
    fn test_dual_filters_wrap_declared_filters() {
        let target = Target::new(
            "EN",
            None,
            TargetFields {
                filters: vec!["mine".into()],
                input_files: vec!["a.md".into()],
                ..Default::default()
            },
        );
        let settings = Settings {
            dual: true,
            dual_filters_dir: Some("filters".into()),
            ..Settings::default()
        };
        let cmd = synthesize(&target, &settings).unwrap();
        let pre = Path::new("filters").join("dual_md.py");
        let post = Path::new("filters").join("teaching_md.py");
        assert_eq!(
            &cmd.args[1..7],
            [
                "-F",
                pre.to_str().unwrap(),
                "-F",
                "mine",
                "-F",
                post.to_str().unwrap()
            ]
        );
        // The target's own filter list is left as declared.
        assert_eq!(target.filters(), ["mine"]);
    }

    #[test]
    fn test_dual_filters_without_dir() {
        assert_eq!(dual_filter_path(None, DUAL_PRE_FILTER), "dual_md");
    }

    #[test]
    fn test_per_target_basename_lookup_and_fallback() {
        let mut bases = IndexMap::new();
        bases.insert("EN".to_string(), "talk-en".to_string());
        let parent = Arc::new(Target::new(
            "talk",
            None,
            TargetFields {
                input_files: vec!["a.md".into()],
                output_basename: Some(OutputBasename::PerTarget(bases)),
                ..Default::default()
            },
        ));
        let en = Target::new("EN", Some(parent.clone()), TargetFields::default());
        let sp = Target::new("SP", Some(parent), TargetFields::default());

        let settings = Settings::default();
        assert_eq!(synthesize(&en, &settings).unwrap().outfile, "talk-en.pdf");
        assert_eq!(synthesize(&sp, &settings).unwrap().outfile, "output_SP.pdf");
    }

    #[test]
    fn test_custom_converter_is_argument_zero() {
        let target = target_with(&[], None);
        let settings = Settings {
            converter: "/opt/pandoc/bin/pandoc".into(),
            ..Settings::default()
        };
        let cmd = synthesize(&target, &settings).unwrap();
        assert_eq!(cmd.args[0], "/opt/pandoc/bin/pandoc");
    }

    #[test]
    fn test_build_command_attaches_to_target() {
        let mut target = target_with(&[("t", scalar("latex"))], Some("paper"));
        build_command(&mut target, &Settings::default()).unwrap();
        assert_eq!(target.outfile(), Some("paper.tex"));
        assert_eq!(target.command().map(|c| c[0].as_str()), Some("pandoc"));
    }
}
