use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use blockfour_ai::{
    board::{Board, Cell},
    HEIGHT, WIDTH,
};

/// A named background colour for the board
#[derive(Copy, Clone, Debug)]
pub struct BoardColor {
    pub name: &'static str,
    rgb: (u8, u8, u8),
}

impl BoardColor {
    const fn new(name: &'static str, rgb: (u8, u8, u8)) -> Self {
        Self { name, rgb }
    }

    fn color(&self) -> Color {
        let (r, g, b) = self.rgb;
        Color::Rgb { r, g, b }
    }
}

pub const BOARD_COLORS: [BoardColor; 17] = [
    BoardColor::new("Sepia", (0xE3, 0xB7, 0x78)),
    BoardColor::new("Latte", (0xE7, 0xC2, 0x7D)),
    BoardColor::new("Sand", (0xD8, 0xB8, 0x63)),
    BoardColor::new("Granola", (0xD6, 0xB8, 0x5A)),
    BoardColor::new("Sandcastle", (0xDA, 0xC1, 0x7C)),
    BoardColor::new("Sand Dollar", (0xED, 0xE8, 0xBA)),
    BoardColor::new("Hazelnut", (0xBD, 0xA5, 0x5D)),
    BoardColor::new("Fawn", (0xC8, 0xA9, 0x51)),
    BoardColor::new("Hazel Wood", (0xC9, 0xBB, 0x8E)),
    BoardColor::new("Egg Nog", (0xFA, 0xE2, 0x9C)),
    BoardColor::new("Oat", (0xDF, 0xC9, 0x8A)),
    BoardColor::new("Beige", (0xEE, 0xDC, 0x9A)),
    BoardColor::new("Macaroon", (0xF9, 0xE0, 0x76)),
    BoardColor::new("Tan", (0xE6, 0xDB, 0xAC)),
    BoardColor::new("Biscotti", (0xE3, 0xC5, 0x65)),
    BoardColor::new("Parmesan", (0xFD, 0xE9, 0x92)),
    BoardColor::new("Buttermilk", (0xFD, 0xEF, 0xB2)),
];

/// Draws the board below the cursor, human pieces in black and computer
/// pieces in white
pub fn display(board: &Board, board_color: &BoardColor) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..HEIGHT {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            let (pos_x, pos_y) = (origin_x + column as u16, origin_y - row as u16);

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(board_color.color())
                        .with(match board.get(row, column)? {
                            Cell::Human => Color::Black,
                            Cell::Computer => Color::White,
                            Cell::Empty => Color::Grey,
                        }),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x + WIDTH as u16, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
