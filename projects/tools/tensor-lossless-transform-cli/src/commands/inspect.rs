use crate::error::CliError;
use crate::util::ratio_percent;
use argh::FromArgs;
use bytesize::ByteSize;
use std::{fs, path::PathBuf};
use tensor_lossless_transform_api::container::HEADER_SIZE;
use tensor_lossless_transform_api::inspect;

#[derive(FromArgs, Debug)]
/// Print the header and per-plane layout of a container
#[argh(subcommand, name = "inspect")]
pub struct InspectCmd {
    /// container file
    #[argh(option)]
    pub input: PathBuf,
}

pub fn handle_inspect_command(cmd: InspectCmd) -> Result<(), CliError> {
    let container = fs::read(&cmd.input)?;
    print!("{}", describe_container(&container)?);
    Ok(())
}

/// Renders a human readable summary of `container`.
pub fn describe_container(container: &[u8]) -> Result<String, CliError> {
    let parsed = inspect(container)?;
    let original = parsed.decompressed_len();

    let mut text = format!(
        "Element width: {} bits\nElements: {}\nOriginal size: {}\nContainer size: {} ({:.2}%)\n",
        parsed.element_width.bits(),
        parsed.element_count,
        ByteSize(original as u64),
        ByteSize(container.len() as u64),
        ratio_percent(container.len(), original)
    );
    text.push_str(&format!("Header: {HEADER_SIZE} bytes\n"));

    for (index, plane) in parsed.planes.iter().enumerate() {
        text.push_str(&format!(
            "Plane {index}: {:?}, {} metadata bytes, {} payload bytes ({:.2}%)\n",
            plane.encoding,
            plane.meta.len(),
            plane.payload.len(),
            ratio_percent(plane.stored_len(), parsed.element_count)
        ));
    }
    Ok(text)
}
