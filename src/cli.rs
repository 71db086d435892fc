use crate::assembly::chunker::WindowPolicy;
use crate::assembly::orientation::Orientation;
use crate::assembly::traverse::ExhaustedStart;
use crate::assembly::{assemble, Assembly, AssemblyConfig, DEFAULT_CHUNK_LENGTH};
use crate::io::{load_reads_with, PeaksOptions};
use crate::report::{self, RunOutput};
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

/// Options shared by every command that builds a graph.
#[derive(Debug, Args, Clone)]
pub struct AssemblyArgs {
    /// Read file: plain text (whitespace-separated reads, `#` comments), FASTA, FASTQ or a
    /// PEAKS de novo CSV, optionally gzipped.
    pub input: PathBuf,

    /// Length of the chunks the reads are cut into; vertex keys are one shorter.
    /// Several comma-separated values give one run each [default: 5]
    #[clap(
        short = 'k',
        long,
        value_delimiter = ',',
        conflicts_with_all = ["k_min", "k_max"]
    )]
    pub chunk_length: Vec<usize>,

    /// Smallest chunk length of a range of runs.
    #[clap(long, requires = "k_max")]
    pub k_min: Option<usize>,

    /// Largest chunk length of a range of runs (inclusive).
    #[clap(long, requires = "k_min")]
    pub k_max: Option<usize>,

    /// Step between chunk lengths of a range.
    #[clap(long, default_value_t = 1)]
    pub k_step: usize,

    /// Also take the window that ends on the last symbol of each read.
    #[clap(long)]
    pub include_final_window: bool,

    /// Do not add reversed chunks.
    #[clap(long)]
    pub forward_only: bool,

    /// Run every chunk length twice, with and then without reversed chunks.
    #[clap(long, conflicts_with = "forward_only")]
    pub both_orientations: bool,

    /// Keep trying later start vertices after reaching one that is used up.
    #[clap(long)]
    pub skip_exhausted: bool,

    /// Field separator of a PEAKS CSV.
    #[clap(long, default_value_t = ',')]
    pub separator: char,

    /// PEAKS peptides with an ALC score at or above this are used whole.
    #[clap(long, default_value_t = 99)]
    pub cutoff_score: u32,

    /// Residue score needed to cut a patch out of a lower scoring PEAKS peptide.
    #[clap(long, default_value_t = 90)]
    pub local_cutoff_score: u32,

    /// Shortest patch taken from a lower scoring PEAKS peptide.
    #[clap(long, default_value_t = 3)]
    pub min_length_patch: usize,
}

#[derive(Debug, Args, Clone)]
pub struct AssembleArgs {
    #[clap(flatten)]
    pub assembly: AssemblyArgs,

    /// Write sequences here instead of stdout (.csv, .fa/.fasta, anything else one per line).
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Drop repeated sequences within each run, keeping the first occurrence.
    #[clap(long)]
    pub unique: bool,
}

#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    #[clap(flatten)]
    pub assembly: AssemblyArgs,

    /// Path to write the graph CSV.
    #[clap(short, long)]
    pub output: PathBuf,
}

/// Every assembly one command runs: each orientation setting crossed with
/// each chunk length, orientation outermost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub k_values: Vec<usize>,
    pub orientations: Vec<Orientation>,
    pub window: WindowPolicy,
    pub exhausted_start: ExhaustedStart,
    pub peaks: PeaksOptions,
}

impl RunPlan {
    /// Build the run plan from CLI arguments (includes validation).
    pub fn from_args(args: &AssemblyArgs) -> Result<Self> {
        validate_args(args)?;

        let k_values = match (args.k_min, args.k_max) {
            (Some(k_min), Some(k_max)) => (k_min..k_max + 1).step_by(args.k_step).collect(),
            _ if args.chunk_length.is_empty() => vec![DEFAULT_CHUNK_LENGTH],
            _ => args.chunk_length.clone(),
        };
        let orientations = if args.both_orientations {
            vec![Orientation::Both, Orientation::ForwardOnly]
        } else if args.forward_only {
            vec![Orientation::ForwardOnly]
        } else {
            vec![Orientation::Both]
        };

        let plan = RunPlan {
            k_values,
            orientations,
            window: if args.include_final_window {
                WindowPolicy::IncludeFinal
            } else {
                WindowPolicy::SkipFinal
            },
            exhausted_start: if args.skip_exhausted {
                ExhaustedStart::Skip
            } else {
                ExhaustedStart::Stop
            },
            peaks: PeaksOptions {
                separator: args.separator as u8,
                cutoff_score: args.cutoff_score,
                local_cutoff_score: args.local_cutoff_score,
                min_length_patch: args.min_length_patch,
            },
        };
        for config in plan.configs() {
            config.validate()?;
        }
        Ok(plan)
    }

    pub fn configs(&self) -> Vec<AssemblyConfig> {
        self.orientations
            .iter()
            .flat_map(|&orientation| {
                self.k_values.iter().map(move |&chunk_length| AssemblyConfig {
                    chunk_length,
                    window: self.window,
                    orientation,
                    exhausted_start: self.exhausted_start,
                })
            })
            .collect()
    }
}

fn validate_args(args: &AssemblyArgs) -> Result<()> {
    match (args.k_min, args.k_max) {
        (Some(k_min), Some(k_max)) if k_min > k_max => {
            return Err(anyhow::anyhow!(
                "k-min ({}) must be less than or equal to k-max ({})",
                k_min,
                k_max
            ));
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(anyhow::anyhow!("k-min and k-max must be given together"));
        }
        _ => {}
    }

    if args.k_step == 0 {
        return Err(anyhow::anyhow!("k-step must be greater than 0"));
    }

    if !args.separator.is_ascii() {
        return Err(anyhow::anyhow!(
            "separator must be a single ASCII character, got '{}'",
            args.separator
        ));
    }
    Ok(())
}

fn check_output_dir(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(anyhow::anyhow!(
                "Output directory does not exist: {}",
                parent.display()
            ));
        }
    }
    Ok(())
}

fn load_and_assemble(args: &AssemblyArgs) -> Result<Vec<Assembly>> {
    let plan = RunPlan::from_args(args)?;
    log::info!("Parameters: {plan:?}");

    log::info!("Loading reads...");
    let reads = load_reads_with(&args.input, &plan.peaks)?;

    let mut assemblies = Vec::new();
    for config in plan.configs() {
        log::info!(
            "Building graph and walking it (k={}, {})...",
            config.chunk_length,
            config.orientation.name()
        );
        let assembly = assemble(&reads, &config)?;
        report::log_summary(&assembly.stats);
        assemblies.push(assembly);
    }
    Ok(assemblies)
}

pub fn run_assemble(args: &AssembleArgs) -> Result<()> {
    if let Some(output) = &args.output {
        check_output_dir(output)?;
    }
    let assemblies = load_and_assemble(&args.assembly)?;

    let runs: Vec<RunOutput> = assemblies
        .iter()
        .map(|assembly| RunOutput::new(assembly, args.unique))
        .collect();
    let kept: usize = runs.iter().map(|run| run.walks.len()).sum();
    let total: usize = assemblies.iter().map(|a| a.walks.len()).sum();
    if kept != total {
        log::info!("Kept {kept} of {total} sequences after removing repeats");
    }

    match &args.output {
        Some(output) => {
            report::write_sequences_to_path(output, &runs)?;
            log::info!("Sequences written to {}", output.display());
        }
        None => {
            let stdout = std::io::stdout();
            report::write_sequences(stdout.lock(), &runs, report::SequenceFormat::Lines)?;
        }
    }
    Ok(())
}

pub fn run_graph(args: &GraphArgs) -> Result<()> {
    check_output_dir(&args.output)?;
    let assemblies = load_and_assemble(&args.assembly)?;
    report::write_graph_to_path(&args.output, &assemblies)?;
    log::info!("Graph written to {}", args.output.display());
    Ok(())
}
