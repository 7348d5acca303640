//! `css-audit` command-line front end
//!
//! Loads the given files, runs one analysis and prints the report as plain
//! text or JSON. Exits with status 1 when an audit reports errors and 2 on
//! usage or output errors.

mod cli;
mod report;

use std::{path::PathBuf, process};

use anyhow::{Context, Result};
use clap::Parser;
use css_audit_core::{
    analysis::{
        audit::{audit, AuditConfig, AuditSeverity},
        compare, coverage, extract_stylesheet, ScopeConfig, ScopeVariableMap, ScriptScanner,
    },
    AnalysisConfig, CascadeMerger, CategorySet, IdentifierSet, ParserConfig, SourceId,
    Stylesheet, StylesheetAnalysis,
};
use css_audit_io::{load_sources, write_stylesheet, LoadedSource, SourceKind};
use rayon::prelude::*;

use cli::{AuditArgs, Cli, Command, MergeArgs, SplitArgs};
use report::Printer;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let hex = matches!(&cli.command, Command::Vars(args) if args.hex);
    let config = analysis_config(&cli.theme_attribute, hex);

    match &cli.command {
        Command::Merge(args) => {
            let inputs = Inputs::load(&args.inputs.files, 0, &config.parser);
            merge(args, &inputs, &Printer::new(cli.json, inputs.names.clone()))
        }
        Command::Vars(args) => {
            let inputs = Inputs::load(&args.compare.inputs.files, 0, &config.parser);
            let reference =
                Inputs::load(&args.compare.references, inputs.next_id(), &config.parser);
            let diff = reference
                .variables(&config.scope)
                .diff(&inputs.variables(&config.scope));
            Printer::new(cli.json, inputs.names.clone()).variables(&diff)?;
            Ok(0)
        }
        Command::Animations(args) => {
            let inputs = Inputs::load(&args.files, 0, &config.parser);
            let analysis = inputs.analyze(&config);
            Printer::new(cli.json, inputs.names.clone()).bindings(analysis.bindings())?;
            Ok(0)
        }
        Command::Integrity(args) => {
            let inputs = Inputs::load(&args.inputs.files, 0, &config.parser);
            let reference = Inputs::load(&args.references, inputs.next_id(), &config.parser);
            let report = compare(
                reference.analyze(&config).identifiers(),
                inputs.analyze(&config).identifiers(),
                CategorySet::all(),
            );
            Printer::new(cli.json, inputs.names.clone()).preservation(&report)?;
            Ok(0)
        }
        Command::Coverage(args) => {
            let inputs = Inputs::load(&args.files, 0, &config.parser);
            let scanner = ScriptScanner::new()?;
            let scripts = inputs.scan_scripts(&scanner);
            let report = coverage(&scripts, inputs.analyze(&config).identifiers());
            Printer::new(cli.json, inputs.names.clone()).preservation(&report)?;
            Ok(0)
        }
        Command::Audit(args) => {
            let inputs = Inputs::load(&args.inputs.files, 0, &config.parser);
            let merged = CascadeMerger::new().merge_stylesheets(&inputs.sheets);
            let analysis = inputs.analyze(&config).with_merge(&merged);
            let issues = audit(&analysis, &audit_config(args));
            Printer::new(cli.json, inputs.names.clone()).issues(&issues)?;
            let failed = issues
                .iter()
                .any(|issue| issue.severity() == AuditSeverity::Error);
            Ok(i32::from(failed))
        }
        Command::Split(args) => split(args, &cli.theme_attribute, &config.parser, cli.json),
    }
}

fn merge(args: &MergeArgs, inputs: &Inputs, printer: &Printer) -> Result<i32> {
    let merged = CascadeMerger::new().merge_stylesheets(&inputs.sheets);
    log::debug!(
        "merged {} rules with {} conflicts",
        merged.rules().len(),
        merged.conflicts().len()
    );

    if let Some(out) = &args.out {
        write_stylesheet(out, merged.rules())?;
        printer.merge_summary(&merged)?;
    } else if printer.is_json() {
        printer.merge_summary(&merged)?;
    } else {
        print!("{}", merged.to_css());
    }
    Ok(0)
}

fn split(args: &SplitArgs, theme_attribute: &str, config: &ParserConfig, json: bool) -> Result<i32> {
    let inputs = Inputs::load(std::slice::from_ref(&args.file), 0, config);
    let Some(sheet) = inputs.sheets.first() else {
        anyhow::bail!("{} is not a stylesheet", args.file.display());
    };
    let split = sheet.split_themes(theme_attribute);

    let mut written = Vec::with_capacity(split.themes().len() + 1);
    let base = args.out_dir.join("base.css");
    write_stylesheet(&base, split.base())?;
    written.push((base, split.base().len()));
    for (name, rules) in split.themes() {
        let path = args.out_dir.join(format!("theme-{name}.css"));
        write_stylesheet(&path, rules)
            .with_context(|| format!("writing theme '{name}'"))?;
        written.push((path, rules.len()));
    }

    Printer::new(json, inputs.names.clone()).split_summary(sheet.rules().len(), &written)?;
    Ok(0)
}

fn analysis_config(theme_attribute: &str, hex: bool) -> AnalysisConfig {
    let parser = ParserConfig::default().with_theme_attribute(theme_attribute);
    let scope = ScopeConfig::default()
        .with_theme_attribute(theme_attribute)
        .with_hex_normalization(hex);
    AnalysisConfig::default().with_parser(parser).with_scope(scope)
}

fn audit_config(args: &AuditArgs) -> AuditConfig {
    let mut config = AuditConfig::default();
    if let Some(severity) = args.min_severity {
        config = config.with_min_severity(severity.into());
    }
    if let Some(max) = args.max_issues {
        config = config.with_max_issues(max);
    }
    for rule in &args.disabled_rules {
        config = config.disable_rule(rule.as_str());
    }
    config
}

/// Loaded and parsed inputs of one side of a run.
struct Inputs {
    sources: Vec<LoadedSource>,
    sheets: Vec<Stylesheet>,
    names: Vec<(SourceId, String)>,
}

impl Inputs {
    /// Load `paths` and parse the stylesheets among them in parallel.
    ///
    /// Ids are assigned in path order starting at `first_id`.
    fn load(paths: &[PathBuf], first_id: u32, config: &ParserConfig) -> Self {
        let sources = load_sources(paths);
        let names: Vec<(SourceId, String)> = sources
            .iter()
            .zip(first_id..)
            .map(|(source, id)| (SourceId(id), source.path.display().to_string()))
            .collect();

        let sheets: Vec<Stylesheet> = sources
            .par_iter()
            .zip(names.par_iter())
            .filter(|(source, _)| source.kind != SourceKind::Script)
            .map(|(source, (id, _))| Stylesheet::parse_with_config(*id, &source.text, config))
            .collect();

        Self {
            sources,
            sheets,
            names,
        }
    }

    fn next_id(&self) -> u32 {
        self.names.last().map_or(0, |(id, _)| id.0 + 1)
    }

    fn analyze(&self, config: &AnalysisConfig) -> StylesheetAnalysis {
        let names = config.animation_names();
        let per_file: Vec<IdentifierSet> = self
            .sheets
            .par_iter()
            .map(|sheet| extract_stylesheet(sheet, &config.parser, &names))
            .collect();
        StylesheetAnalysis::from_parts(&self.sheets, per_file, config)
    }

    fn variables(&self, config: &ScopeConfig) -> ScopeVariableMap {
        ScopeVariableMap::extract(&self.sheets, config)
    }

    fn scan_scripts(&self, scanner: &ScriptScanner) -> IdentifierSet {
        let per_file: Vec<IdentifierSet> = self
            .sources
            .par_iter()
            .zip(self.names.par_iter())
            .filter(|(source, _)| source.kind == SourceKind::Script)
            .map(|(source, (id, _))| scanner.scan(*id, &source.text))
            .collect();
        if per_file.is_empty() {
            log::warn!("no script sources among the inputs");
        }
        IdentifierSet::reduce(&per_file)
    }
}

pub(crate) fn name_of(names: &[(SourceId, String)], id: SourceId) -> String {
    names
        .iter()
        .find(|(candidate, _)| *candidate == id)
        .map_or_else(|| id.to_string(), |(_, name)| name.clone())
}
