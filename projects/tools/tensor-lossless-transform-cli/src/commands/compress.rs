use crate::error::CliError;
use crate::util::{parse_element_width, ratio_percent, Throughput};
use argh::FromArgs;
use bytesize::ByteSize;
use std::{fs, path::PathBuf, time::Instant};
use tensor_lossless_transform_api::{ElementWidth, TensorCompressBuilder};
use tensor_lossless_transform_zstd::ZStandardCoder;

#[derive(FromArgs, Debug)]
/// Compress a raw tensor file of little-endian elements
#[argh(subcommand, name = "compress")]
pub struct CompressCmd {
    /// raw tensor file
    #[argh(option)]
    pub input: PathBuf,

    /// container file to create
    #[argh(option)]
    pub output: PathBuf,

    /// element width in bits: 16 (bf16/fp16) or 32 (fp32)
    #[argh(option, from_str_fn(parse_element_width))]
    pub bits: ElementWidth,

    /// zstandard level, 1-22 [default: 3]
    #[argh(option, default = "3")]
    pub level: i32,

    /// code planes on the current thread only
    #[argh(switch)]
    pub single_threaded: bool,
}

pub fn handle_compress_command(cmd: CompressCmd) -> Result<(), CliError> {
    let coder = ZStandardCoder::new(cmd.level)?;
    let builder = TensorCompressBuilder::new(coder).multithreaded(!cmd.single_threaded);

    let original = fs::metadata(&cmd.input)?.len() as usize;
    let start = Instant::now();
    let compressed = builder.compress_file(&cmd.input, &cmd.output, cmd.bits)?;
    let elapsed = start.elapsed();

    println!(
        "{} -> {} ({:.2}%) in {elapsed:.2?}, {}",
        ByteSize(original as u64),
        ByteSize(compressed as u64),
        ratio_percent(compressed, original),
        Throughput::from_elapsed(original, elapsed)
    );
    Ok(())
}
