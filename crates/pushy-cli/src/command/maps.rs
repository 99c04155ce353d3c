use pushy_engine::Map;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct MapsArg {
    /// Print the layout of each map
    #[arg(long)]
    layout: bool,
}

pub(crate) fn run(arg: &MapsArg) -> anyhow::Result<()> {
    for map in Map::all()? {
        let seats = map
            .seat_order()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<10} {}x{}  up to {} players ({seats})",
            map.name(),
            map.board().columns(),
            map.board().rows(),
            map.max_players(),
        );
        if arg.layout {
            println!("{}", map.board());
            println!();
        }
    }
    Ok(())
}
