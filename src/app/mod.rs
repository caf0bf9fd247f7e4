pub(crate) mod config;
mod net;
mod telemetry;
mod types;

use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use esp_println::println;

use biomech_node::identity::DeviceIdentity;

use self::config::{
    BODY_POSITION, DEVICE_NAME, SENSOR_TYPE, SERVER_ENDPOINT, SERVER_IP, SERVER_PORT,
};

pub(crate) fn run() -> ! {
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // The radio driver allocates its buffers from this heap.
    esp_alloc::heap_allocator!(size: 72 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    println!("biomech-node: starting");

    let net = match net::setup(peripherals.WIFI) {
        Ok(net) => net,
        Err(err) => {
            println!("biomech-node: net setup failed: {}", err);
            halt_forever();
        }
    };

    let identity = DeviceIdentity::from_mac(net.mac, DEVICE_NAME, SENSOR_TYPE, BODY_POSITION);
    let [a, b, c, d] = SERVER_IP;
    println!("biomech-node: device id {}", identity.device_id);
    println!(
        "biomech-node: server http://{}.{}.{}.{}:{}{}",
        a, b, c, d, SERVER_PORT, SERVER_ENDPOINT
    );

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(net::net_task(net.net_runner));
        spawner.must_spawn(net::connection_task(net.wifi_controller, net.stack));
        spawner.must_spawn(telemetry::telemetry_task(net.stack, identity));
    });
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
