use clap::Parser;

/// No operational arguments: the root is the directory holding the executable
/// and the report always goes to `temp.txt` in the working directory.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Write the folder structure and file contents of a project into one text file"
)]
pub struct Cli {}
