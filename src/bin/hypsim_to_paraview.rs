use hypsim::fem::PostProc;
use hypsim::StrError;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "hypsim_to_paraview",
    about = "Generates VTU and PVD files for visualization with Paraview"
)]
struct Options {
    out_dir: String,

    fn_stem: String,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // load data
    let post = PostProc::new(&options.out_dir, &options.fn_stem)?;

    // write VTU files
    for index in &post.file_io.indices {
        let state = post.read_state(*index)?;
        post.file_io.write_vtu(&post.mesh, &state, *index)?;
    }

    // write PVD file
    post.file_io.write_pvd()?;

    // message
    let path_pvd = post.file_io.path_pvd();
    let thin_line = format!("{:─^1$}", "", path_pvd.len());
    println!("\n\n{}", thin_line);
    println!("VTU files generated; the PVD file is:");
    println!("{}", path_pvd);
    println!("{}\n\n", thin_line);
    Ok(())
}
