mod opt;

use crate::opt::{Opt, PidSource};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use v0perf::{
    prelude::*,
    writer::write_histograms,
    GIT_BRANCH, GIT_REV, VERSION,
};

fn main() -> Result<()> {
    let args = argfile::expand_args_from(
        std::env::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )
    .with_context(|| "Failed to read argument file")?;
    let opt = Opt::parse_from(args);

    let env = Env::default().filter_or("V0PERF_LOG", &opt.loglevel);
    env_logger::init_from_env(env);

    if let (Some(rev), Some(branch)) = (GIT_REV, GIT_BRANCH) {
        info!("v0perf {VERSION} rev {rev} ({branch})");
    } else {
        info!("v0perf {VERSION}");
    }

    debug!("settings: {:#?}", opt);

    let mut config = match &opt.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if opt.diffractive_only {
        config.event.diffractive_only = true;
    }
    debug!("analysis configuration: {config:#?}");

    match opt.pid {
        PidSource::Stored => run_main(opt, config, StoredPid {}),
        PidSource::None => run_main(opt, config, NoPid {}),
    }?;
    info!("done");
    Ok(())
}

fn run_main<P: PidResponse>(
    opt: Opt,
    config: AnalysisConfig,
    pid: P,
) -> Result<()> {
    let reader = CombinedReader::from_files(&opt.infiles)?;
    let processor = EventProcessor::new(config, pid);
    let writer = FileWriter::builder()
        .filename(opt.outfile.clone())
        .format(opt.outformat)
        .compression(opt.compression)
        .build();

    let mut analysis = V0AnalysisBuilder {
        reader,
        processor,
        writer,
    }
    .build();
    let histograms = analysis.run()?;
    info!("Candidates written to {:?}", opt.outfile);

    for (reason, n) in &histograms.rejections {
        debug!("rejected ({reason}): {n}");
    }
    if let Some(path) = &opt.histograms {
        write_histograms(path, &histograms, opt.compression)?;
        info!("Histograms written to {path:?}");
    }
    Ok(())
}
