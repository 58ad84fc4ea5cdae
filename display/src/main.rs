use clap::Parser;
use iced::{
    mouse, time,
    widget::{
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, text, Container,
    },
    Color, Element, Length, Point, Rectangle, Renderer, Subscription, Task, Theme,
};
use log::warn;
use scopecore::frame::{build_frame, polar_to_unit, RadarFrame, SessionState};
use scopecore::readings::{Window, WINDOW_CAP};
use scopecore::store::ReadingStore;
use scopecore::FrameError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Clone)]
#[command(author, version, about = "Polar scope over the collected radar readings")]
struct Args {
    /// Reading log produced by the collector
    #[arg(long, default_value = "radar_data.csv")]
    data_file: PathBuf,
    /// Seconds between scope refreshes
    #[arg(long, default_value_t = 2)]
    refresh_secs: u64,
}

fn main() -> iced::Result {
    env_logger::init();
    let args = Args::parse();
    iced::application(
        move || RadarDisplay::boot(args.clone()),
        RadarDisplay::update,
        RadarDisplay::view,
    )
    .title(application_title)
    .subscription(application_subscription)
    .theme(application_theme)
    .run()
}

fn application_title(_: &RadarDisplay) -> String {
    "Object tracking radar system".into()
}

fn application_subscription(state: &RadarDisplay) -> Subscription<Message> {
    time::every(state.refresh).map(|_| Message::Tick)
}

fn application_theme(_: &RadarDisplay) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct RadarDisplay {
    store: ReadingStore,
    refresh: Duration,
    session: SessionState,
    frame: Option<RadarFrame>,
    status: String,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    WindowLoaded(Result<Window, String>),
}

impl RadarDisplay {
    fn boot(args: Args) -> (Self, Task<Message>) {
        let store = ReadingStore::open(&args.data_file);
        let display = RadarDisplay {
            store: store.clone(),
            refresh: Duration::from_secs(args.refresh_secs.max(1)),
            session: SessionState::new(),
            frame: None,
            status: "Waiting for sensor data...".into(),
        };
        let task = Task::perform(load_window(store), Message::WindowLoaded);
        (display, task)
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                Task::perform(load_window(state.store.clone()), Message::WindowLoaded)
            }
            Message::WindowLoaded(Ok(window)) => {
                match build_frame(&window, &mut state.session) {
                    Ok(frame) => {
                        state.status = format!(
                            "{} readings in view, {} tracked",
                            frame.raw.len(),
                            frame.tracked.len()
                        );
                        state.frame = Some(frame);
                    }
                    Err(FrameError::NoAngles) => {
                        state.frame = None;
                        state.status = "No angle data yet.".into();
                    }
                }
                Task::none()
            }
            Message::WindowLoaded(Err(err)) => {
                warn!("reading log not usable: {}", err);
                state.frame = None;
                state.status = "Waiting for sensor data...".into();
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let mut layout = column![
            text("Object tracking radar system").size(26),
            text(&state.status).size(14),
        ]
        .spacing(8)
        .padding(16);

        if let Some(frame) = &state.frame {
            layout = layout
                .push(
                    text("Sweep beam in green, raw echoes in red, tracked objects in blue")
                        .size(12),
                )
                .push(
                    Canvas::new(RadarScope {
                        frame: frame.clone(),
                    })
                    .width(Length::Fill)
                    .height(Length::Fixed(650.0)),
                );
        }

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

async fn load_window(store: ReadingStore) -> Result<Window, String> {
    store
        .load_window(WINDOW_CAP)
        .map_err(|err| err.to_string())
}

#[derive(Clone)]
struct RadarScope {
    frame: RadarFrame,
}

impl canvas::Program<Message> for RadarScope {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.02, 0.05, 0.02),
        );

        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius = bounds.width.min(bounds.height) / 2.0 - 20.0;

        // Range rings every quarter of full scale, 25 cm apart.
        for ring in 1..=4 {
            let ring_radius = radius * (ring as f32 / 4.0);
            let ring_path = Path::new(|builder| builder.circle(center, ring_radius));
            frame.stroke(
                &ring_path,
                Stroke::default().with_color(Color::from_rgb(0.1, 0.3, 0.1)),
            );
        }

        let axes = Path::new(|builder| {
            builder.move_to(Point::new(center.x - radius, center.y));
            builder.line_to(Point::new(center.x + radius, center.y));
            builder.move_to(Point::new(center.x, center.y - radius));
            builder.line_to(Point::new(center.x, center.y + radius));
        });
        frame.stroke(
            &axes,
            Stroke::default()
                .with_color(Color::from_rgb(0.15, 0.35, 0.15))
                .with_width(1.0),
        );

        // Trail beams, newest first, fading with age.
        for beam in &self.frame.beams {
            if let Some(tip) = project(center, radius, beam.angle, self.frame.max_range) {
                let beam_path = Path::new(|builder| {
                    builder.move_to(center);
                    builder.line_to(tip);
                });
                frame.stroke(
                    &beam_path,
                    Stroke::default()
                        .with_width(2.0)
                        .with_color(Color::from_rgba(0.3, 1.0, 0.3, beam.opacity)),
                );
            }
        }

        for point in &self.frame.raw {
            if let Some(position) = project(center, radius, point.angle, point.distance) {
                let marker = Path::new(|builder| builder.circle(position, 4.5));
                frame.fill(&marker, Color::from_rgb(0.9, 0.2, 0.2));
            }
        }

        // Confirmed objects render as an open circle with a center dot so
        // they stay visible on top of the echo that produced them.
        for point in &self.frame.tracked {
            if let Some(position) = project(center, radius, point.angle, point.distance) {
                let ring = Path::new(|builder| builder.circle(position, 7.0));
                frame.stroke(
                    &ring,
                    Stroke::default()
                        .with_width(2.0)
                        .with_color(Color::from_rgb(0.25, 0.5, 1.0)),
                );
                let dot = Path::new(|builder| builder.circle(position, 2.0));
                frame.fill(&dot, Color::from_rgb(0.25, 0.5, 1.0));
            }
        }

        vec![frame.into_geometry()]
    }
}

/// Maps a polar reading onto the scope. Non-finite values never produce a
/// screen point.
fn project(center: Point, radius: f32, angle: f32, distance: f32) -> Option<Point> {
    if !angle.is_finite() || !distance.is_finite() {
        return None;
    }
    let (x, y) = polar_to_unit(angle, distance);
    Some(Point::new(center.x + x * radius, center.y - y * radius))
}
