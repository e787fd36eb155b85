use std::time::Instant;
use haar_tn::{
    circuit::Circuit,
    compute::{ Computation, HaarIntegration, Multiply, compute_all },
    interpret::{ max_d_count, summarize },
    network::{ Gate, GateType, Location },
};
use num_rational::Rational64 as R64;
use tracing_subscriber::EnvFilter;

fn timeit<F, T>(mut f: F) -> (T, f64)
where F: FnMut() -> T
{
    let t0 = Instant::now();
    let out: T = f();
    (out, (Instant::now() - t0).as_secs_f64())
}

// four-qubit brickwork circuit, differentiated with respect to U(1; 0-1)
//
// ∣0⟩ --U------U-----------
//       |
// ∣0⟩ --U------U------O----
//              |
// ∣0⟩ --U------U-----------
//       |
// ∣0⟩ --U------U-----------
//
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut circuit = Circuit::new(4);
    let init = Location::new(0, 0, 3);
    circuit.add_gate(Gate::new(init, init.sort_id(), GateType::Initial));
    for loc in [
        Location::new(1, 0, 1),
        Location::new(1, 2, 3),
        Location::new(2, 0, 0),
        Location::new(2, 1, 2),
        Location::new(2, 3, 3),
    ] {
        circuit.add_gate(Gate::unitary(loc));
    }
    circuit.add_observable(
        Gate::new(Location::new(3, 1, 1), R64::new(0, 1), GateType::Observable));

    let var = circuit.to_grad_var(Location::new(1, 0, 1).sort_id())?;
    println!("initial terms: {}", var.len());

    let steps: [&dyn Computation; 3] = [
        &HaarIntegration::new(2),
        &Multiply::new(
            GateType::Grad, false,
            GateType::UnintegrableUnitary, true,
            GateType::UrWUr, false,
        ),
        &Multiply::new(
            GateType::UnintegrableUnitary, false,
            GateType::Grad, true,
            GateType::UrWUr, false,
        ),
    ];
    print!("integrate ... ");
    let (result, t) = timeit(|| compute_all(var.clone(), steps));
    let result = result?;
    println!("{:.3} secs", t);
    println!("final terms: {}", result.len());

    let summary = summarize(&result);
    println!("distinct diagrams: {}", summary.len());
    for (net, factors) in summary.iter() {
        println!(
            "{} node(s), {} edge(s), {} group(s); leading exponent {:?}",
            net.count_nodes(),
            net.count_edges(),
            net.count_groups(),
            max_d_count(factors),
        );
        for factor in factors.iter() {
            println!("    {}", factor);
        }
    }

    Ok(())
}
