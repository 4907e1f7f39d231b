use ::agent_mind::{
    Agent, AttributeStore, BehaviorNode, Comparator, CompareOp, Context, EngineConfig, Lazy,
    Status, Symbol, TreeBuilder, TreeNode,
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

static POSITION: Lazy<Symbol> = Lazy::new(|| "position".into());
static TARGET: Lazy<Symbol> = Lazy::new(|| "target".into());
static STAMINA: Lazy<Symbol> = Lazy::new(|| "stamina".into());

/// Walks one unit per frame towards the target, spending stamina.
struct WalkToTarget;

impl BehaviorNode for WalkToTarget {
    fn initialize(&mut self, _ctx: &Context, store: &mut AttributeStore) {
        println!("WalkToTarget: setting off");
        store.set("steps", 0u32);
    }

    fn tick(
        &mut self,
        _children: &mut [TreeNode],
        _ctx: &mut Context,
        store: &mut AttributeStore,
    ) -> Status {
        let target = *store.get::<Position>(*TARGET);
        let pos = store.get_mut::<Position>(*POSITION);
        let (dx, dy) = (target.x - pos.x, target.y - pos.y);
        let dist = (dx * dx + dy * dy).sqrt();
        if dist <= 1. {
            *pos = target;
            return Status::Success;
        }
        pos.x += dx / dist;
        pos.y += dy / dist;
        *store.get_mut::<u32>("steps") += 1;
        *store.get_mut::<i32>(*STAMINA) -= 1;
        Status::Running
    }

    fn end(&mut self, status: Status, _ctx: &Context, store: &mut AttributeStore) {
        println!(
            "WalkToTarget: {} after {} steps",
            status,
            store.get::<u32>("steps")
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let builder = TreeBuilder::new(EngineConfig::from_yaml(
        "
inverter_running: propagate
selector_exhausted: reset_all
",
    )?);

    let tree = builder.selector(vec![
        builder.condition(
            Comparator::new(*STAMINA, CompareOp::LessEqual, 0i32).predicate(),
            TreeNode::action("Rest", |store| {
                println!("Rest: catching breath");
                store.set(*STAMINA, 3i32);
                Status::Success
            }),
            false,
        ),
        builder.sequence(vec![
            TreeNode::new("WalkToTarget", WalkToTarget),
            TreeNode::action("Wave", |_| {
                println!("Wave: hello!");
                Status::Success
            }),
        ]),
    ]);

    let mut store = AttributeStore::default();
    store.set_debug(*POSITION, Position { x: 0., y: 0. });
    store.set_debug(*TARGET, Position { x: 6., y: 8. });
    store.set_debug(*STAMINA, 3i32);

    let mut agent = Agent::with_store(tree, store);
    for frame in 0..20 {
        let status = agent.update();
        println!("frame {}: {}", frame, status);
        if status == Status::Success
            && agent.store().get::<Position>(*POSITION) == agent.store().get::<Position>(*TARGET)
        {
            break;
        }
    }

    println!("{}", agent.describe());
    println!("{:?}", agent.store());
    println!("Total symbols: {}", Symbol::count());
    Ok(())
}
