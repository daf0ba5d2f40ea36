//! Guarded cell demonstration binary
//!
//! Walks the guarded cell API with an announcing lock that prints every
//! acquire and release, then runs contended stress rounds showing mutual
//! exclusion and dual-lock deadlock freedom.

use clap::{Parser, Subcommand};
use guarded::Guarded;
use lock_api::RawMutex;
use parking_lot::RawMutex as ParkingLotRawMutex;
use std::sync::Arc;
use std::thread;

#[derive(Parser)]
#[command(name = "guarded-demo")]
#[command(about = "Guarded cell walkthrough and contention demos", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scripted walkthrough with a lock that announces every acquire/release
    Walkthrough,
    /// Contended counter plus reverse-order dual-lock stress
    Stress {
        /// Number of writer threads
        #[arg(short, long, default_value_t = num_cpus::get())]
        threads: usize,
        /// Iterations per thread
        #[arg(short, long, default_value_t = 100_000)]
        iterations: usize,
    },
}

/// Raw mutex that announces every acquire and release on stdout
struct AnnouncingRawMutex {
    inner: ParkingLotRawMutex,
}

unsafe impl RawMutex for AnnouncingRawMutex {
    const INIT: Self = AnnouncingRawMutex {
        inner: <ParkingLotRawMutex as RawMutex>::INIT,
    };

    type GuardMarker = <ParkingLotRawMutex as RawMutex>::GuardMarker;

    fn lock(&self) {
        println!("    [lock {:p}] acquire", self);
        self.inner.lock();
    }

    fn try_lock(&self) -> bool {
        let locked = self.inner.try_lock();
        if locked {
            println!("    [lock {:p}] acquire", self);
        }
        locked
    }

    unsafe fn unlock(&self) {
        self.inner.unlock();
        println!("    [lock {:p}] release", self);
    }

    fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }
}

/// String cell whose lock narrates the walkthrough
type Announced = Guarded<String, AnnouncingRawMutex>;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Walkthrough) | None => walkthrough(),
        Some(Commands::Stress {
            threads,
            iterations,
        }) => stress(threads, iterations),
    }
}

fn walkthrough() {
    let cell: Announced = Guarded::with_lock(String::from("12"));

    // Append through a temporary accessor: the lock spans one expression
    cell.write().push_str("11");
    println!();

    // Read through a temporary accessor
    println!(">> {} EOF", cell.read());
    println!();

    // A named accessor holds the lock across all three appends
    {
        let mut access = cell.write();
        access.push_str("12");
        println!(">> {}", access);
        access.push_str("13");
        println!(">> {}", access);
        access.push_str("42");
        println!(">> {}", access);
    }
    println!();

    let other: Announced = Guarded::with_lock(String::from("1211121342"));

    if other == cell {
        println!(">> Data is equal");
    }
    println!();

    other.write().push_str("11");
    println!();

    if other != cell {
        println!(">> Data is not equal");
    }
    println!();

    // Snapshot conversion copies the payload out under the lock
    let snapshot: String = other.load();
    println!("{}", snapshot);
    println!();

    // Dual-cell swap takes both locks as one step
    let first: Announced = Guarded::with_lock(String::from("12"));
    let second: Announced = Guarded::with_lock(String::from("34"));
    first.swap(&second);
    println!(">> after swap: {} / {}", first.read(), second.read());
    println!();

    // Swapping against a plain value takes only the cell's lock
    let cell_x: Announced = Guarded::with_lock(String::from("X"));
    let mut slot = String::from("Y");
    cell_x.swap_value(&mut slot);
    println!(">> after swap_value: cell={} slot={}", cell_x.read(), slot);
}

fn stress(threads: usize, iterations: usize) {
    println!(
        "contended counter: {} threads x {} increments",
        threads, iterations
    );

    let counter = Arc::new(Guarded::new(0_u64));

    let mut handles = Vec::new();
    for worker in 0..threads {
        let counter = Arc::clone(&counter);
        handles.push(
            thread::Builder::new()
                .name(format!("guarded-writer-{}", worker))
                .spawn(move || {
                    for _ in 0..iterations {
                        *counter.write() += 1;
                    }
                })
                .expect("Failed to spawn writer thread"),
        );
    }
    for handle in handles {
        handle.join().expect("Failed to join writer thread");
    }

    println!(
        "counter = {} (expected {})",
        counter.load(),
        threads as u64 * iterations as u64
    );

    println!(
        "dual-lock ping-pong: 2 threads x {} reverse-order swaps",
        iterations
    );

    let left = Arc::new(Guarded::new(String::from("ping")));
    let right = Arc::new(Guarded::new(String::from("pong")));

    let forward = {
        let left = Arc::clone(&left);
        let right = Arc::clone(&right);
        thread::spawn(move || {
            for _ in 0..iterations {
                left.swap(&right);
            }
        })
    };
    let backward = {
        let left = Arc::clone(&left);
        let right = Arc::clone(&right);
        thread::spawn(move || {
            for _ in 0..iterations {
                right.swap(&left);
            }
        })
    };

    forward.join().expect("Failed to join forward swapper");
    backward.join().expect("Failed to join backward swapper");

    println!("no deadlock: left={} right={}", left.read(), right.read());
}
