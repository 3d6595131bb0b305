use std::sync::LazyLock;

use super::init::{ray_squares, relevant_line_mask};
use crate::core::*;

/******************************************\
|==========================================|
|          Line Indexer Definition         |
|==========================================|
\******************************************/

/// Perfect hash of the occupancy seen by one (cross direction, square) cell.
///
/// `index(occ) = base + ((occ & mask) * coeff) >> shift`. The coefficients
/// are fixed so that the top `popcount(mask)` bits of the product are distinct
/// for every subset of the mask. All cells share one flat table, orthogonal
/// cells first.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineIndexer {
    mask: Bitboard,
    coeff: u64,
    shift: u8,
    base: usize,
}

impl LineIndexer {
    const EMPTY: LineIndexer = LineIndexer {
        mask: Bitboard::EMPTY,
        coeff: 0,
        shift: 0,
        base: 0,
    };

    #[inline]
    pub const fn index(&self, occupancy: Bitboard) -> usize {
        let hash = (occupancy.0 & self.mask.0).wrapping_mul(self.coeff) >> self.shift;
        self.base + hash as usize
    }

    /// Occupancy squares that influence the cell
    #[inline]
    pub const fn mask(&self) -> Bitboard {
        self.mask
    }

    /// Number of table entries owned by the cell
    #[inline]
    pub const fn size(&self) -> usize {
        1 << self.mask.count_bits()
    }

    /// Indexer of one cell
    #[inline]
    pub fn get(cross: CrossDirection, sq: Square) -> &'static LineIndexer {
        &LINE_INDEXERS[cross.index()][sq.index()]
    }
}

pub(super) type LineIndexerTable = [[LineIndexer; Square::NUM]; CrossDirection::NUM];

const INDEXERS: LineIndexerTable = populate_line_indexers();

pub(super) static LINE_INDEXERS: LineIndexerTable = INDEXERS;

/// Total number of entries of the flat line tables
pub const LINE_TABLE_SIZE: usize = line_table_size();

/******************************************\
|==========================================|
|             Hash Coefficients            |
|==========================================|
\******************************************/

/// Indexed by `cross * 64 + square`
#[rustfmt::skip]
const LINE_COEFFS: [u64; CrossDirection::NUM * Square::NUM] = [
    0x588002815261C002, 0x150010210380C006, 0x22000CBDDD805600, 0x3200060010882040,
    0x3001002040801008, 0x660018105C220023, 0x7C001F2812018410, 0x620007AACAF6008C,
    0x007F8004C0028C24, 0x00110021C0018105, 0x0036001061428201, 0x003A00162A203E00,
    0x0042001200A03606, 0x0022004470160088, 0x00010013005A0004, 0x001A00054F710234,
    0x00C0E2800487400D, 0x0006460022078304, 0x003D220012028145, 0x000D16000E1CBE00,
    0x000EAE002200080E, 0x0001C80140102004, 0x0003A4000DDD7098, 0x0000BA00224D8409,
    0x004009818004CA61, 0x0016834200220B00, 0x0013004300200191, 0x0002980080100081,
    0x000400808008013C, 0x000600420018908C, 0x000397BC002750BA, 0x00012D42001B8405,
    0x001381C502002204, 0x005E208202004108, 0x00210320050011C2, 0x0019A1C0CA001200,
    0x0002005B12000B17, 0x0005004209002C00, 0x0000C84D1C000610, 0x00002C0146003681,
    0x0020608B40008009, 0x007A8503C003002A, 0x0039437082020023, 0x000A230010010018,
    0x000E005028A20004, 0x0002004408420010, 0x0002DB38103C0042, 0x000141C4008A0017,
    0x003E0F077C462600, 0x002E090133467A00, 0x0027846142025600, 0x0012C222E9FE3200,
    0x000B613200368600, 0x00057C4020100801, 0x0002507237D57400, 0x0001AC09C2970A00,
    0x005302A415FEC182, 0x002D7202C7002082, 0x001482003790E342, 0x0008C20020067146,
    0x000600502144280A, 0x0002000830141542, 0x00015814D04A04BC, 0x0000388404FEC9AE,
    0x00713021070400B2, 0x00070F841323C3FE, 0x005025722A466532, 0x000C2C058BCB9371,
    0x001C042302999B2D, 0x00090CA940879D8E, 0x0005880F10916F3C, 0x0002802C1004146C,
    0x000014D08E980AF3, 0x000038700523C107, 0x0000504C088CA56C, 0x0000281C9702E380,
    0x0000141460D47F25, 0x000006281C4079A9, 0x000001C43A20506C, 0x00000110FC522165,
    0x00587470204B0C53, 0x00305EB88F351C02, 0x0028045F1801E181, 0x0034078804605904,
    0x0002000402CC8BCC, 0x0001004E00410444, 0x0007203C04163616, 0x000321DB04023E36,
    0x0010404C918C4134, 0x0010485BF0231D10, 0x0004061790118030, 0x00400401DF820880,
    0x00148400C0802013, 0x00101101DD80CD0C, 0x000E0A09041B1714, 0x00054102D8840528,
    0x00142C6CE6E0E010, 0x000415E0B1724460, 0x0004C0D0021807E8, 0x0002DE0080580280,
    0x0060078400AC8120, 0x003021F2000BB4E8, 0x00065DD75F640C14, 0x0009808E084D050D,
    0x0008024E21D1D087, 0x000288280EA12853, 0x00010C403004C82C, 0x000000A011038811,
    0x00002E6AA1FCDC04, 0x0024470243010A03, 0x0030A1083581990C, 0x000BBC30D608D9C8,
    0x00032405A0660ACA, 0x0001C31822F0851B, 0x000001C60CB0260A, 0x00000001842404AA,
    0x0000004630440553, 0x000028D0107484A9, 0x004010126A0A58CF, 0x000DDDEC03C97EAD,
    0x0003CA022A60137E, 0x000002F10818043D, 0x00000001C6083408, 0x000000000308C802,
    0x0000000070E20223, 0x0000006124302620, 0x00005C1C0C383A01, 0x00403424004A4F00,
];

/******************************************\
|==========================================|
|          Populating the Indexers         |
|==========================================|
\******************************************/

const fn populate_line_indexers() -> LineIndexerTable {
    let mut table = [[LineIndexer::EMPTY; Square::NUM]; CrossDirection::NUM];
    let mut base = 0;

    let mut c = 0;
    while c < CrossDirection::NUM {
        let cross = unsafe { CrossDirection::from_unchecked(c as u8) };

        let mut i = 0;
        while i < Square::NUM {
            let sq = unsafe { Square::from_unchecked(i as u8) };
            let mask = relevant_line_mask(cross, sq);
            let bits = mask.count_bits();

            table[c][i] = LineIndexer {
                mask,
                coeff: LINE_COEFFS[c * Square::NUM + i],
                shift: (Square::NUM as u32 - bits) as u8,
                base,
            };

            base += 1 << bits;
            i += 1;
        }

        c += 1;
    }

    table
}

const fn line_table_size() -> usize {
    let last = INDEXERS[CrossDirection::NUM - 1][Square::NUM - 1];
    last.base + last.size()
}

/******************************************\
|==========================================|
|               Line Tables                |
|==========================================|
\******************************************/

/// Attack and pin sets for every line index
pub(super) struct LineTables {
    /// Squares with no occupied square between them and the origin
    pub attacks: Box<[Bitboard]>,
    /// Squares with exactly one occupied square between them and the origin
    pub pins: Box<[Bitboard]>,
}

pub(super) static LINE_TABLES: LazyLock<LineTables> = LazyLock::new(populate_line_tables);

/// Forces construction of the line tables
pub fn init_line_tables() {
    LazyLock::force(&LINE_TABLES);
}

/// Fills both tables by enumerating every subset of every relevant mask.
///
/// A second subset landing on an already written entry means the
/// coefficients are broken; the tables would silently return wrong attacks,
/// so construction aborts.
fn populate_line_tables() -> LineTables {
    let mut attacks = vec![Bitboard::EMPTY; LINE_TABLE_SIZE].into_boxed_slice();
    let mut pins = vec![Bitboard::EMPTY; LINE_TABLE_SIZE].into_boxed_slice();
    let mut written = vec![false; LINE_TABLE_SIZE];

    for cross in CrossDirection::iter() {
        for sq in Square::iter() {
            let indexer = LineIndexer::get(cross, sq);

            for occ in indexer.mask().subsets() {
                let index = indexer.index(occ);

                if written[index] {
                    log::error!("line index collision: {cross:?} {sq} occupancy {:#018x}", occ.0);
                    panic!("line indexer coefficients of {cross:?} {sq} are not a perfect hash");
                }

                written[index] = true;
                attacks[index] = ray_squares(cross, sq, occ, 0);
                pins[index] = ray_squares(cross, sq, occ, 1);
            }
        }
    }

    log::debug!("line attack and pin tables built with {LINE_TABLE_SIZE} entries each");

    LineTables { attacks, pins }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_perfect_hashes() {
        for cross in CrossDirection::iter() {
            for sq in Square::iter() {
                let indexer = LineIndexer::get(cross, sq);
                let mut seen = vec![false; indexer.size()];

                for occ in indexer.mask().subsets() {
                    let local = indexer.index(occ) - indexer.base;
                    assert!(!seen[local], "collision at {cross:?} {sq}");
                    seen[local] = true;
                }

                assert!(seen.iter().all(|&s| s));
            }
        }
    }

    #[test]
    fn test_cells_are_contiguous() {
        let mut expected_base = 0;

        for cross in CrossDirection::iter() {
            for sq in Square::iter() {
                let indexer = LineIndexer::get(cross, sq);
                assert_eq!(indexer.base, expected_base);
                expected_base += indexer.size();
            }
        }

        assert_eq!(expected_base, LINE_TABLE_SIZE);
        assert_eq!(LINE_TABLE_SIZE, 107_648);
    }

    #[test]
    fn test_occupancy_outside_mask_is_ignored() {
        let indexer = LineIndexer::get(CrossDirection::Orthogonal, Square::A1);
        let edge = Bitboard::from([Square::H1, Square::A8, Square::E5]);

        assert_eq!(indexer.index(edge), indexer.index(Bitboard::EMPTY));
    }

    #[test]
    fn test_tables_build() {
        init_line_tables();
        assert_eq!(LINE_TABLES.attacks.len(), LINE_TABLE_SIZE);
        assert_eq!(LINE_TABLES.pins.len(), LINE_TABLE_SIZE);
    }
}
